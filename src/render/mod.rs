pub mod layout;
pub mod compositor;
