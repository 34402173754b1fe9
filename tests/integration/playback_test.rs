//! Animation scenarios driven through the public API on a manual clock

use std::cell::RefCell;
use std::time::Duration;

use termfolio::clock::{Clock, ManualClock};
use termfolio::config::Config;
use termfolio::page::Page;
use termfolio::player::{play, Callbacks, PlayerStatus, TaskStatus};
use termfolio::sequence::{default_boot_sequence, Step, StepKind};
use termfolio::session::{FileSessionStore, SessionStore, VISITED_KEY};
use termfolio::surface::{BufferSurface, Stage, SurfaceId};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ============================================================================
// Sequence player
// ============================================================================

#[test]
fn steps_fire_at_cumulative_deadlines() {
    let clock = ManualClock::new();
    let fired = RefCell::new(Vec::new());
    let completed_at = RefCell::new(None);

    let steps = vec![
        Step::new(StepKind::Prompt, "a$ ", 0),
        Step::new(StepKind::Output, "done", 500),
    ];
    let mut callbacks = Callbacks::new(
        |step: &Step| fired.borrow_mut().push((step.text.clone(), clock.now())),
        || *completed_at.borrow_mut() = Some(clock.now()),
    );
    let mut player = play(steps, ms(1000), clock.now(), &callbacks);

    while !player.status().is_terminal() {
        player.tick(clock.now(), &mut callbacks);
        clock.advance_ms(10);
    }

    assert_eq!(
        *fired.borrow(),
        vec![("a$ ".to_string(), ms(0)), ("done".to_string(), ms(500))]
    );
    assert_eq!(*completed_at.borrow(), Some(ms(1500)));
}

#[test]
fn stock_sequence_runs_in_order_and_completes_once() {
    let mut texts = Vec::new();
    let mut completions = 0;
    let steps = default_boot_sequence();
    let expected: Vec<String> = steps.iter().map(|s| s.text.clone()).collect();
    let total: u64 = steps.iter().map(|s| s.delay_ms).sum();

    {
        let mut callbacks = Callbacks::new(|s: &Step| texts.push(s.text.clone()), || completions += 1);
        let mut player = play(steps, ms(1000), ms(0), &callbacks);
        assert_eq!(player.tick(ms(total), &mut callbacks), PlayerStatus::Running);
        assert_eq!(
            player.tick(ms(total + 1000), &mut callbacks),
            PlayerStatus::Completed
        );
        assert_eq!(
            player.tick(ms(total + 5000), &mut callbacks),
            PlayerStatus::Completed
        );
    }

    assert_eq!(texts, expected);
    assert_eq!(completions, 1);
}

#[test]
fn cancel_after_first_step_silences_the_rest() {
    let mut texts = Vec::new();
    let mut completed = false;
    {
        let mut callbacks =
            Callbacks::new(|s: &Step| texts.push(s.text.clone()), || completed = true);
        let mut player = play(default_boot_sequence(), ms(1000), ms(0), &callbacks);
        player.tick(ms(300), &mut callbacks);
        player.cancel();
        assert_eq!(
            player.tick(ms(60_000), &mut callbacks),
            PlayerStatus::Cancelled
        );
    }

    assert_eq!(texts.len(), 1);
    assert!(!completed);
}

// ============================================================================
// Surface tasks
// ============================================================================

#[test]
fn typing_grows_by_one_char_per_interval() {
    let mut stage = Stage::new();
    let id = SurfaceId::from("title");
    stage.insert(id.clone(), BufferSurface::new());
    stage.type_text(&id, "héllo", ms(50), ms(0)).unwrap();

    let mut seen = Vec::new();
    let mut now = ms(0);
    while stage.is_busy(&id) {
        stage.tick(now);
        let content = stage.get(&id).unwrap().content();
        if seen.last() != Some(&content) {
            seen.push(content);
        }
        now += ms(10);
    }

    assert_eq!(seen, ["", "h", "hé", "hél", "héll", "héllo"]);
    assert!(stage.get(&id).unwrap().is_completed());
}

#[test]
fn retyping_a_surface_replaces_the_old_text() {
    let mut stage = Stage::new();
    let id = SurfaceId::from("title");
    stage.insert(id.clone(), BufferSurface::new());

    let first = stage.type_text(&id, "first", ms(50), ms(0)).unwrap();
    stage.tick(ms(100));
    stage.type_text(&id, "second", ms(50), ms(100)).unwrap();
    assert!(first.is_cancelled());

    let finished = stage.tick(ms(1000));
    assert_eq!(finished, vec![(id.clone(), TaskStatus::Completed)]);
    assert_eq!(stage.get(&id).unwrap().content(), "second");
}

#[test]
fn tasks_on_missing_surfaces_do_nothing() {
    let mut stage = Stage::new();
    let id = SurfaceId::from("nowhere");
    assert!(stage.type_text(&id, "text", ms(50), ms(0)).is_none());
    assert!(stage.reveal_lines(&id, ms(300), ms(0)).is_none());
    assert!(stage.tick(ms(1000)).is_empty());
    assert_eq!(stage.next_deadline(), None);
}

// ============================================================================
// Page and session flag
// ============================================================================

fn page_config() -> Config {
    let mut config = Config::default();
    config.hero.lines = vec!["hi".to_string()];
    config.contact.lines = vec!["one".to_string(), "two".to_string(), "three".to_string()];
    config
}

fn drive(page: &mut Page, clock: &ManualClock, store: &mut dyn SessionStore) -> Vec<Step> {
    let mut rendered = Vec::new();
    page.on_ready(clock.now());
    while let Some(deadline) = page.next_deadline() {
        clock.set(deadline.max(clock.now()));
        let tick = page.tick(clock.now());
        rendered.extend(tick.steps);
        if tick.persist_visited {
            store.set(VISITED_KEY).unwrap();
        }
    }
    rendered
}

#[test]
fn file_store_gates_the_loading_sequence_per_session() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut store = FileSessionStore::new(dir.path(), "4242");
    let clock = ManualClock::new();

    let visited = store.is_set(VISITED_KEY).unwrap();
    let mut first = Page::new(&page_config(), default_boot_sequence(), visited);
    let rendered = drive(&mut first, &clock, &mut store);
    assert_eq!(rendered, default_boot_sequence());
    assert!(store.is_set(VISITED_KEY).unwrap());

    let visited = store.is_set(VISITED_KEY).unwrap();
    let mut second = Page::new(&page_config(), default_boot_sequence(), visited);
    let rendered = drive(&mut second, &clock, &mut store);
    assert!(rendered.is_empty());
    assert_eq!(second.hero_surface(0).unwrap().content(), "hi");

    let other_session = FileSessionStore::new(dir.path(), "4343");
    assert!(!other_session.is_set(VISITED_KEY).unwrap());
}

#[test]
fn contact_lines_reveal_every_interval_after_trigger() {
    let mut page = Page::new(&page_config(), Vec::new(), true);
    page.on_ready(ms(0));
    page.tick(ms(0));
    assert!(page.on_contact_visibility(0.5, ms(1000)));

    let visible = |page: &Page| page.contact_surface().unwrap().visible_lines().len();
    page.tick(ms(1299));
    assert_eq!(visible(&page), 0);
    page.tick(ms(1300));
    assert_eq!(visible(&page), 1);
    page.tick(ms(1600));
    assert_eq!(visible(&page), 2);
    page.tick(ms(1900));
    assert_eq!(visible(&page), 3);
}
