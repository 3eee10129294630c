use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::SiteConfig;
use crate::content::{BUNDLED_PAGE, BUNDLED_PAGE_URL};
use crate::dom::parser::parse_html;
use crate::error::Result;
use crate::net::fetch::{fetch_page, FetchResult};
use crate::render::layout::{compute_layout, Viewport};
use crate::view::ViewController;

/// Where the page markup comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    /// The portfolio page compiled into the binary.
    Bundled,
    File(PathBuf),
    Url(String),
}

impl PageSource {
    /// Interpret a command-line argument. Existing paths win over URLs, so
    /// `index.html` loads the local file rather than `https://index.html`.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None => PageSource::Bundled,
            Some(s) if s.starts_with("http://") || s.starts_with("https://") => {
                PageSource::Url(s.to_string())
            }
            Some(s) if Path::new(s).exists() => PageSource::File(PathBuf::from(s)),
            Some(s) => PageSource::Url(s.to_string()),
        }
    }
}

/// The page pipeline: Source → Parse → Layout → ViewController
#[derive(Clone)]
pub struct PageLoader {
    config: SiteConfig,
    viewport: Viewport,
}

impl PageLoader {
    pub fn new(config: SiteConfig, viewport: Viewport) -> Self {
        Self { config, viewport }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Read the raw markup for `source`.
    pub fn fetch(&self, source: &PageSource) -> Result<FetchResult> {
        match source {
            PageSource::Bundled => Ok(FetchResult {
                html: BUNDLED_PAGE.to_string(),
                url: BUNDLED_PAGE_URL.to_string(),
                status: 200,
            }),
            PageSource::File(path) => {
                let html = std::fs::read_to_string(path)?;
                let url = std::fs::canonicalize(path)
                    .map(|p| format!("file://{}", p.display()))
                    .unwrap_or_else(|_| format!("file://{}", path.display()));
                log::info!("read {} ({} bytes)", path.display(), html.len());
                Ok(FetchResult { html, url, status: 200 })
            }
            PageSource::Url(url) => fetch_page(url),
        }
    }

    /// Load a page through the full pipeline
    pub fn load(&self, source: &PageSource, now: Instant) -> Result<ViewController> {
        let fetched = self.fetch(source)?;
        if !(200..300).contains(&fetched.status) {
            log::warn!("{} answered {}; rendering the body anyway", fetched.url, fetched.status);
        }
        Ok(self.process_html(&fetched.html, &fetched.url, now))
    }

    /// Process raw HTML through the pipeline (for testing)
    pub fn process_html(&self, html: &str, url: &str, now: Instant) -> ViewController {
        let doc = parse_html(html, url);
        let layout = compute_layout(&doc, self.viewport);
        log::debug!(
            "laid out {} nodes, document height {:.0}px",
            doc.len(),
            layout.document_height()
        );
        ViewController::new(doc, layout, self.config.clone(), self.viewport, now)
    }
}

/// Apply a window resize: new viewport, fresh geometry.
pub fn relayout(controller: &mut ViewController, viewport: Viewport) {
    controller.on_resize(viewport);
    let layout = compute_layout(controller.document(), viewport);
    controller.set_layout(layout);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn loader() -> PageLoader {
        PageLoader::new(SiteConfig::default(), Viewport::new(1280.0, 800.0))
    }

    #[test]
    fn source_from_arg() {
        assert_eq!(PageSource::from_arg(None), PageSource::Bundled);
        assert_eq!(
            PageSource::from_arg(Some("https://example.com")),
            PageSource::Url("https://example.com".into())
        );
        assert_eq!(
            PageSource::from_arg(Some("no-such-file.example")),
            PageSource::Url("no-such-file.example".into())
        );
    }

    #[test]
    fn bundled_page_wires_every_subsystem() {
        let ctl = loader()
            .load(&PageSource::Bundled, Instant::now())
            .unwrap();
        let reg = ctl.registry();
        assert!(reg.navbar.is_some());
        assert!(reg.sections.len() >= 5);
        assert_eq!(reg.project_triggers.len(), 4);
        assert!(reg.modal.is_some());
        assert!(reg.form.is_some());
        assert!(!reg.stat_numbers.is_empty());
        assert_eq!(ctl.active_section_id(), Some("home"));
        // 1280px is wide enough for both pointer loops.
        assert!(ctl.ambient().is_some());
        assert!(ctl.cursor().is_some());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"<html><body><section id="home" class="hero"><h1>Hi</h1></section></body></html>"#
        )
        .unwrap();
        let source = PageSource::File(file.path().to_path_buf());
        let ctl = loader().load(&source, Instant::now()).unwrap();
        assert!(ctl.document().url.starts_with("file://"));
        assert_eq!(ctl.registry().sections.len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = PageSource::File(PathBuf::from("/definitely/not/here.html"));
        let err = loader().load(&source, Instant::now()).err().unwrap();
        assert!(matches!(err, crate::error::FolioError::Io(_)));
    }

    #[test]
    fn relayout_tracks_viewport() {
        let mut ctl = loader().load(&PageSource::Bundled, Instant::now()).unwrap();
        let hero = ctl.registry().hero.section.unwrap();
        relayout(&mut ctl, Viewport::new(800.0, 1000.0));
        assert_eq!(ctl.state().viewport, Viewport::new(800.0, 1000.0));
        assert!(ctl.layout().get(hero).height >= 1000.0);
    }
}
