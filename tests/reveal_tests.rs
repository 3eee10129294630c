mod common;

use std::time::Instant;

use common::*;
use folio_view::config::SiteConfig;
use folio_view::view::counter::CounterState;
use folio_view::view::reveal::RevealState;

#[test]
fn counters_land_exactly_on_target() {
    let t0 = Instant::now();
    let mut ctl = controller(t0);
    ctl.frame(t0);

    let stats = ctl.registry().stat_numbers.clone();
    assert_eq!(stats.len(), 2);
    assert!(matches!(
        ctl.counter(stats[0]).map(|c| c.state()),
        Some(CounterState::Running { .. })
    ));

    run_frames(&mut ctl, t0, 16, 1000, 16);
    let mid: u64 = ctl.document().text_content(stats[0]).parse().unwrap();
    assert!(mid > 0 && mid < 92, "mid-ramp value {}", mid);
    assert!(ctl.document().text_content(stats[1]).ends_with('+'));

    run_frames(&mut ctl, t0, 1016, 2600, 16);
    assert_eq!(ctl.document().text_content(stats[0]), "92");
    assert_eq!(ctl.document().text_content(stats[1]), "15+");
    assert!(ctl.counter(stats[0]).unwrap().is_done());
    assert_eq!(ctl.pending_timers(), 0);
}

#[test]
fn late_frames_catch_up_without_overshooting() {
    let t0 = Instant::now();
    let mut ctl = controller(t0);
    ctl.frame(t0);
    // One frame five seconds later drains every queued tick at once.
    ctl.frame(ms(t0, 5000));
    let stat = ctl.registry().stat_numbers[0];
    assert_eq!(ctl.document().text_content(stat), "92");
}

#[test]
fn counter_text_keeps_its_place_on_the_page() {
    let t0 = Instant::now();
    let mut ctl = controller(t0);
    let stat = ctl.registry().stat_numbers[0];
    let stat_box = ctl.layout().get(stat);
    let nodes = ctl.document().len();

    ctl.frame(t0);
    run_frames(&mut ctl, t0, 16, 2600, 16);

    assert_eq!(ctl.document().len(), nodes);
    let children = ctl.document().node(stat).children.clone();
    assert_eq!(children.len(), 1);
    let text_box = ctl.layout().get(children[0]);
    assert!(text_box.height > 0.0);
    assert_eq!(text_box.y, stat_box.y);
}

#[test]
fn zero_tick_config_still_finishes() {
    let t0 = Instant::now();
    let config = SiteConfig {
        counter_tick_ms: 0,
        counter_duration_ms: 0,
        ..SiteConfig::default()
    };
    let mut ctl = controller_with(config, DESKTOP, t0);
    ctl.frame(t0);
    run_frames(&mut ctl, t0, 1, 300, 1);

    let stat = ctl.registry().stat_numbers[0];
    assert_eq!(ctl.document().text_content(stat), "92");
    assert_eq!(ctl.pending_timers(), 0);
}

#[test]
fn counters_never_restart() {
    let t0 = Instant::now();
    let mut ctl = controller(t0);
    ctl.frame(t0);
    run_frames(&mut ctl, t0, 16, 2600, 16);
    let stat = ctl.registry().stat_numbers[0];

    ctl.on_scroll(3000.0, ms(t0, 2700));
    ctl.frame(ms(t0, 2700));
    ctl.on_scroll(0.0, ms(t0, 2800));
    ctl.frame(ms(t0, 2800));
    ctl.frame(ms(t0, 2816));

    assert_eq!(ctl.document().text_content(stat), "92");
    assert_eq!(ctl.counter(stat).map(|c| c.state()), Some(CounterState::Done));
}

#[test]
fn stagger_children_reveal_one_step_apart() {
    let t0 = Instant::now();
    let mut ctl = controller(t0);
    ctl.frame(t0);

    let grid = first_with_class(&ctl, "skills-grid");
    let children = ctl.document().element_children(grid);
    assert_eq!(children.len(), 3);
    assert!(!ctl.document().has_class(grid, "visible"));

    let y = ctl.layout().get(grid).y;
    let t = ms(t0, 100);
    ctl.on_scroll(y - 300.0, t);
    ctl.frame(t);
    let visible = |ctl: &folio_view::view::ViewController| {
        children
            .iter()
            .map(|&c| ctl.document().has_class(c, "visible"))
            .collect::<Vec<_>>()
    };
    assert!(ctl.document().has_class(grid, "visible"));
    assert_eq!(visible(&ctl), vec![true, false, false]);

    ctl.frame(ms(t0, 200));
    assert_eq!(visible(&ctl), vec![true, true, false]);

    ctl.frame(ms(t0, 300));
    assert_eq!(visible(&ctl), vec![true, true, true]);
}

#[test]
fn revealed_elements_stay_revealed() {
    let t0 = Instant::now();
    let mut ctl = controller(t0);
    let header = first_with_class(&ctl, "section-header");
    assert_eq!(ctl.observer().state(header), RevealState::Pending);

    let y = ctl.layout().get(header).y;
    ctl.on_scroll(y - 200.0, ms(t0, 50));
    ctl.frame(ms(t0, 50));
    assert_eq!(ctl.observer().state(header), RevealState::Revealed);

    ctl.on_scroll(0.0, ms(t0, 100));
    ctl.frame(ms(t0, 100));
    assert!(ctl.document().has_class(header, "visible"));
    assert_eq!(ctl.observer().state(header), RevealState::Revealed);
}

#[test]
fn element_just_below_the_margin_is_not_revealed() {
    let t0 = Instant::now();
    let mut ctl = controller(t0);
    let header = first_with_class(&ctl, "section-header");
    let y = ctl.layout().get(header).y;

    // The header's top edge sits 20px above the viewport bottom, inside
    // the 50px root margin.
    ctl.on_scroll(y - 780.0, ms(t0, 50));
    ctl.frame(ms(t0, 50));
    assert_eq!(ctl.observer().state(header), RevealState::Pending);
}
