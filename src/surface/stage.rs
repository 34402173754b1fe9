//! Surface registry and per-surface task ownership.
//!
//! Each surface has at most one task writing to it. Starting a task on a
//! surface that already has one cancels the old task first, so two writers
//! never interleave on the same surface.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use tracing::debug;

use super::BufferSurface;
use crate::player::{CancelToken, LineReveal, TaskStatus, TypingTask};

/// Name of a surface on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(String);

impl SurfaceId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SurfaceId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A task bound to one surface.
#[derive(Debug, Clone)]
pub enum SurfaceTask {
    Typing(TypingTask),
    Reveal(LineReveal),
}

impl SurfaceTask {
    fn tick(&mut self, now: Duration, surface: &mut BufferSurface) -> TaskStatus {
        match self {
            Self::Typing(task) => task.tick(now, surface),
            Self::Reveal(task) => task.tick(now, surface),
        }
    }

    fn token(&self) -> &CancelToken {
        match self {
            Self::Typing(task) => task.token(),
            Self::Reveal(task) => task.token(),
        }
    }

    fn next_deadline(&self) -> Option<Duration> {
        match self {
            Self::Typing(task) => task.next_deadline(),
            Self::Reveal(task) => task.next_deadline(),
        }
    }
}

/// All surfaces on the page plus the task currently writing to each.
#[derive(Debug, Default)]
pub struct Stage {
    surfaces: HashMap<SurfaceId, BufferSurface>,
    tasks: HashMap<SurfaceId, SurfaceTask>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a surface, replacing (and detaching) any previous one.
    pub fn insert(&mut self, id: impl Into<SurfaceId>, surface: BufferSurface) {
        let id = id.into();
        if let Some(mut old) = self.surfaces.insert(id.clone(), surface) {
            old.detach();
            self.cancel(&id);
        }
    }

    /// Remove a surface. Its task is cancelled and writes nothing more.
    pub fn remove(&mut self, id: &SurfaceId) -> Option<BufferSurface> {
        self.cancel(id);
        self.surfaces.remove(id).map(|mut surface| {
            surface.detach();
            surface
        })
    }

    pub fn get(&self, id: &SurfaceId) -> Option<&BufferSurface> {
        self.surfaces.get(id)
    }

    pub fn get_mut(&mut self, id: &SurfaceId) -> Option<&mut BufferSurface> {
        self.surfaces.get_mut(id)
    }

    pub fn contains(&self, id: &SurfaceId) -> bool {
        self.surfaces.contains_key(id)
    }

    /// Type `text` into surface `id` starting now.
    pub fn type_text(
        &mut self,
        id: &SurfaceId,
        text: &str,
        per_char: Duration,
        now: Duration,
    ) -> Option<CancelToken> {
        self.schedule_typing(id, text, per_char, now)
    }

    /// Type `text` into surface `id`, starting at clock reading `at`.
    ///
    /// Cancels whatever task the surface had. Returns `None` (and does
    /// nothing) if the surface does not exist.
    pub fn schedule_typing(
        &mut self,
        id: &SurfaceId,
        text: &str,
        per_char: Duration,
        at: Duration,
    ) -> Option<CancelToken> {
        self.start_task(id, SurfaceTask::Typing(TypingTask::new(text, per_char, at)))
    }

    /// Reveal the lines already on surface `id`, one per `interval`.
    pub fn reveal_lines(
        &mut self,
        id: &SurfaceId,
        interval: Duration,
        now: Duration,
    ) -> Option<CancelToken> {
        self.start_task(id, SurfaceTask::Reveal(LineReveal::new(interval, now)))
    }

    fn start_task(&mut self, id: &SurfaceId, task: SurfaceTask) -> Option<CancelToken> {
        if !self.surfaces.contains_key(id) {
            debug!(surface = %id, "task target missing, ignoring");
            return None;
        }
        let token = task.token().clone();
        if let Some(previous) = self.tasks.insert(id.clone(), task) {
            debug!(surface = %id, "replacing in-flight task");
            previous.token().cancel();
        }
        Some(token)
    }

    /// Cancel the task on surface `id`, if any.
    pub fn cancel(&mut self, id: &SurfaceId) {
        if let Some(task) = self.tasks.remove(id) {
            task.token().cancel();
        }
    }

    /// Whether a task is writing to surface `id`.
    pub fn is_busy(&self, id: &SurfaceId) -> bool {
        self.tasks.contains_key(id)
    }

    pub fn has_tasks(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Advance every task to `now`. Finished tasks are dropped and returned.
    pub fn tick(&mut self, now: Duration) -> Vec<(SurfaceId, TaskStatus)> {
        let mut finished = Vec::new();
        for (id, task) in self.tasks.iter_mut() {
            let status = match self.surfaces.get_mut(id) {
                Some(surface) => task.tick(now, surface),
                None => {
                    task.token().cancel();
                    TaskStatus::Cancelled
                }
            };
            if status.is_done() {
                finished.push((id.clone(), status));
            }
        }
        for (id, _) in &finished {
            self.tasks.remove(id);
        }
        finished.sort_by(|a, b| a.0.cmp(&b.0));
        finished
    }

    /// Earliest deadline across all tasks.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.tasks.values().filter_map(SurfaceTask::next_deadline).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Surface;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn stage_with(id: &str) -> (Stage, SurfaceId) {
        let mut stage = Stage::new();
        let id = SurfaceId::from(id);
        stage.insert(id.clone(), BufferSurface::new());
        (stage, id)
    }

    #[test]
    fn typing_on_missing_surface_is_ignored() {
        let mut stage = Stage::new();
        let token = stage.type_text(&"nope".into(), "abc", ms(10), ms(0));
        assert!(token.is_none());
        assert!(!stage.has_tasks());
    }

    #[test]
    fn second_typing_call_wins() {
        let (mut stage, id) = stage_with("hero");
        let first = stage.type_text(&id, "first text", ms(10), ms(0)).unwrap();
        stage.tick(ms(30));

        let second = stage.type_text(&id, "second", ms(10), ms(30)).unwrap();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());

        for t in 30..=1000 {
            stage.tick(ms(t));
            let content = stage.get(&id).unwrap().content();
            assert!(
                "second".starts_with(&content),
                "unexpected content {content:?}"
            );
        }
        assert_eq!(stage.get(&id).unwrap().content(), "second");
    }

    #[test]
    fn independent_surfaces_run_independently() {
        let mut stage = Stage::new();
        let a = SurfaceId::from("a");
        let b = SurfaceId::from("b");
        stage.insert(a.clone(), BufferSurface::new());
        stage.insert(b.clone(), BufferSurface::new());

        stage.type_text(&a, "xx", ms(10), ms(0));
        stage.type_text(&b, "yyyy", ms(10), ms(0));

        let done = stage.tick(ms(20));
        assert_eq!(done, vec![(a.clone(), TaskStatus::Completed)]);
        assert_eq!(stage.get(&b).unwrap().content(), "yy");

        let done = stage.tick(ms(40));
        assert_eq!(done, vec![(b.clone(), TaskStatus::Completed)]);
        assert!(!stage.has_tasks());
    }

    #[test]
    fn removing_surface_cancels_its_task() {
        let (mut stage, id) = stage_with("hero");
        let token = stage.type_text(&id, "abc", ms(10), ms(0)).unwrap();
        let removed = stage.remove(&id).unwrap();

        assert!(token.is_cancelled());
        assert!(!removed.is_attached());
        assert!(stage.tick(ms(1000)).is_empty());
    }

    #[test]
    fn reveal_lines_shows_existing_content() {
        let mut stage = Stage::new();
        let id = SurfaceId::from("contact");
        stage.insert(id.clone(), BufferSurface::with_lines(["a", "b"]));

        stage.reveal_lines(&id, ms(300), ms(0)).unwrap();
        stage.tick(ms(0));
        assert_eq!(stage.get(&id).unwrap().visible_lines().len(), 0);
        stage.tick(ms(600));
        assert_eq!(stage.get(&id).unwrap().visible_lines().len(), 2);
        assert!(!stage.is_busy(&id));
    }

    #[test]
    fn scheduled_typing_leaves_surface_alone_until_start() {
        let (mut stage, id) = stage_with("hero");
        stage.get_mut(&id).unwrap().replace_content("placeholder");
        stage.schedule_typing(&id, "hi", ms(10), ms(1500));

        stage.tick(ms(1000));
        assert_eq!(stage.get(&id).unwrap().content(), "placeholder");
        assert_eq!(stage.next_deadline(), Some(ms(1500)));

        stage.tick(ms(1520));
        assert_eq!(stage.get(&id).unwrap().content(), "hi");
    }
}
