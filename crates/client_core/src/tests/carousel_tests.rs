use super::*;
use proptest::prelude::*;

fn carousel(count: usize) -> Carousel<usize> {
    Carousel::initialize((0..count).collect(), CarouselConfig::default()).expect("non-empty")
}

#[test]
fn empty_slide_set_is_not_initialized() {
    assert!(Carousel::<u8>::initialize(Vec::new(), CarouselConfig::default()).is_none());
}

#[test]
fn initial_render_shows_first_slide() {
    let view = carousel(4).render();
    assert_eq!(view.active_index, 0);
    assert_eq!(view.counter, "1 / 4");
    assert_eq!(view.offset_percent, 0.0);
    assert!(view.previous_disabled);
    assert!(!view.next_disabled);
    assert_eq!(view.indicators.len(), 4);
    assert_eq!(view.indicators.iter().filter(|i| i.active).count(), 1);
    assert_eq!(view.indicators[2].label, "Go to slide 3");
}

#[test]
fn single_slide_disables_both_controls() {
    let view = carousel(1).render();
    assert!(view.previous_disabled);
    assert!(view.next_disabled);
    assert_eq!(view.counter, "1 / 1");
}

#[test]
fn out_of_range_go_to_is_ignored() {
    let mut c = carousel(3);
    c.go_to(1).expect("valid");
    assert!(c.go_to(3).is_none());
    assert!(c.go_to(usize::MAX).is_none());
    assert_eq!(c.active_index(), 1);
}

#[test]
fn go_to_is_idempotent() {
    let mut c = carousel(5);
    let first = c.go_to(3).expect("valid");
    let second = c.go_to(3).expect("valid");
    assert_eq!(first, second);
    assert_eq!(first.offset_percent, -300.0);
    assert_eq!(first.counter, "4 / 5");
}

#[test]
fn next_and_previous_stop_at_edges() {
    let mut c = carousel(2);
    assert!(c.handle(CarouselEvent::PreviousClicked).is_none());
    let view = c.handle(CarouselEvent::NextClicked).expect("advance");
    assert!(view.next_disabled);
    assert!(c.handle(CarouselEvent::NextClicked).is_none());
    assert_eq!(c.active_index(), 1);
    assert_eq!(*c.active_slide(), 1);
}

#[test]
fn arrow_keys_navigate_and_other_keys_do_not() {
    let mut c = carousel(3);
    c.handle(CarouselEvent::KeyPressed(Key::from_name("ArrowRight")))
        .expect("right");
    assert_eq!(c.active_index(), 1);
    c.handle(CarouselEvent::KeyPressed(Key::from_name("ArrowLeft")))
        .expect("left");
    assert_eq!(c.active_index(), 0);
    assert!(c
        .handle(CarouselEvent::KeyPressed(Key::from_name("Enter")))
        .is_none());
}

#[test]
fn indicator_click_jumps_including_current() {
    let mut c = carousel(4);
    assert_eq!(c.handle(CarouselEvent::IndicatorClicked(0)).expect("same").active_index, 0);
    assert_eq!(c.handle(CarouselEvent::IndicatorClicked(3)).expect("jump").active_index, 3);
    assert!(c.handle(CarouselEvent::IndicatorClicked(4)).is_none());
}

#[test]
fn swipe_threshold_is_exclusive() {
    let config = CarouselConfig::default();
    let state = CarouselState { active_index: 1 };
    let swipe = |start_x: f64, end_x: f64| CarouselEvent::Swipe { start_x, end_x };

    assert_eq!(transition(state, 3, &config, swipe(100.0, 50.0)), None);
    assert_eq!(transition(state, 3, &config, swipe(100.0, 49.0)), Some(2));
    assert_eq!(transition(state, 3, &config, swipe(50.0, 100.0)), None);
    assert_eq!(transition(state, 3, &config, swipe(49.0, 100.0)), Some(0));
}

#[test]
fn swipe_threshold_is_configurable() {
    let config = CarouselConfig {
        swipe_threshold: 10.0,
    };
    let event = CarouselEvent::Swipe {
        start_x: 30.0,
        end_x: 15.0,
    };
    assert_eq!(
        transition(CarouselState::default(), 2, &config, event),
        Some(1)
    );
}

#[test]
fn pointer_gesture_navigates_once() {
    let mut c = carousel(3);
    c.pointer_down(300.0);
    let view = c.pointer_up(200.0).expect("advance");
    assert_eq!(view.active_index, 1);

    assert!(c.pointer_up(0.0).is_none(), "release without press is ignored");
    assert_eq!(c.active_index(), 1);
}

#[test]
fn swipe_is_edge_clamped() {
    let mut c = carousel(2);
    c.pointer_down(0.0);
    assert!(c.pointer_up(200.0).is_none());
    assert_eq!(c.active_index(), 0);
}

fn event_strategy() -> impl Strategy<Value = CarouselEvent> {
    prop_oneof![
        Just(CarouselEvent::PreviousClicked),
        Just(CarouselEvent::NextClicked),
        (0usize..20).prop_map(CarouselEvent::IndicatorClicked),
        Just(CarouselEvent::KeyPressed(Key::ArrowLeft)),
        Just(CarouselEvent::KeyPressed(Key::ArrowRight)),
        Just(CarouselEvent::KeyPressed(Key::Other)),
        (-400.0f64..400.0, -400.0f64..400.0)
            .prop_map(|(start_x, end_x)| CarouselEvent::Swipe { start_x, end_x }),
    ]
}

proptest! {
    #[test]
    fn index_stays_in_bounds_and_controls_match(
        count in 1usize..12,
        events in proptest::collection::vec(event_strategy(), 0..64),
    ) {
        let mut c = carousel(count);
        for event in events {
            let before = c.active_index();
            if c.handle(event).is_none() {
                prop_assert_eq!(c.active_index(), before);
            }
            let view = c.render();
            prop_assert!(view.active_index < count);
            prop_assert_eq!(view.previous_disabled, view.active_index == 0);
            prop_assert_eq!(view.next_disabled, view.active_index == count - 1);
            prop_assert_eq!(view.indicators.iter().filter(|i| i.active).count(), 1);
            prop_assert!(view.indicators[view.active_index].active);
        }
    }

    #[test]
    fn out_of_range_targets_never_move(
        count in 1usize..12,
        start in 0usize..12,
        extra in 0usize..100,
    ) {
        let mut c = carousel(count);
        c.go_to(start.min(count - 1));
        let before = c.active_index();
        prop_assert!(c.go_to(count + extra).is_none());
        prop_assert_eq!(c.active_index(), before);
    }
}
