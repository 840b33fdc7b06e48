//! Anchored tween schedule over one exclusively owned [`ReelState`].
//!
//! Tweens are appended with an [`Anchor`] that is resolved immediately against the cursor
//! (the previously appended tween) or a named label. The `from` value of every target is the
//! value the field holds at the tween's start instant; it is computed lazily once per schedule
//! revision. `seek(t)` always recomputes from the immutable initial state, so it is pure and
//! idempotent. The live clock (`play`/`tick`) is a thin layer on top of `seek`.

use std::collections::{BTreeMap, HashMap};

use crate::animation::ease::Ease;
use crate::animation::state::{Field, FieldKind, ReelState, Value};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::{lerp, unit};

/// Observer invoked with the tween's linear (un-eased) progress in `[0, 1]`.
pub type TweenObserver = Box<dyn FnMut(f64, &ReelState)>;

/// Callback invoked with `(elapsed_secs, state)` after every applied tick.
pub type TickCallback = Box<dyn FnMut(f64, &ReelState)>;

/// Stable identifier of an appended tween.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct TweenId(pub usize);

/// Start-time anchor of a tween, child timeline or label.
#[derive(Clone, Debug, PartialEq)]
pub enum Anchor {
    /// Absolute time in seconds.
    Absolute(f64),
    /// End of the previously appended item plus a gap.
    AfterPrevious(f64),
    /// A named label plus a gap.
    AfterLabel(String, f64),
    /// Start of the previously appended item plus an offset.
    WithPrevious(f64),
}

impl Default for Anchor {
    fn default() -> Self {
        Self::AfterPrevious(0.0)
    }
}

/// Builder for one tween.
pub struct TweenSpec {
    targets: Vec<(Field, Value)>,
    duration: f64,
    ease: Ease,
    anchor: Anchor,
    observer: Option<TweenObserver>,
}

impl TweenSpec {
    /// Interpolating tween over `duration` seconds.
    pub fn to(duration: f64) -> Self {
        Self {
            targets: Vec::new(),
            duration,
            ease: Ease::Linear,
            anchor: Anchor::default(),
            observer: None,
        }
    }

    /// Zero-duration set, applied atomically at its start time.
    pub fn set() -> Self {
        Self::to(0.0)
    }

    /// Add a target field and its end value.
    pub fn field(mut self, field: Field, to: impl Into<Value>) -> Self {
        self.targets.push((field, to.into()));
        self
    }

    /// Easing function (default linear).
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Start anchor (default: right after the previous item).
    pub fn at(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Per-update observer, called from [`Timeline::tick`] while the tween is active.
    pub fn on_update(mut self, observer: impl FnMut(f64, &ReelState) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }
}

/// Linear character counter `0 -> len` over `len * per_char` seconds.
pub fn typewriter(field: Field, len: usize, per_char: f64) -> TweenSpec {
    TweenSpec::to(len as f64 * per_char)
        .field(field, Value::Num(len as f64))
        .ease(Ease::Linear)
}

struct Tween {
    id: TweenId,
    start: f64,
    duration: f64,
    ease: Ease,
    targets: Vec<(Field, Value)>,
    observer: Option<TweenObserver>,
}

impl Tween {
    fn end(&self) -> f64 {
        self.start + self.duration
    }

    fn progress(&self, t: f64) -> f64 {
        if self.duration <= 0.0 {
            1.0
        } else {
            unit((t - self.start) / self.duration)
        }
    }
}

/// Tween order and resolved `from` values for one schedule revision.
struct Resolved {
    order: Vec<usize>,
    from: Vec<Vec<Value>>,
}

/// One target of a [`ScheduledTween`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ScheduledTarget {
    /// Addressed field.
    pub field: Field,
    /// Value at the tween's start.
    pub from: Value,
    /// End value.
    pub to: Value,
}

/// Flat, resolved view of one tween.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ScheduledTween {
    /// Tween id.
    pub id: TweenId,
    /// Absolute start time in seconds.
    pub start: f64,
    /// Duration in seconds (0 for sets).
    pub duration: f64,
    /// Easing function.
    pub ease: Ease,
    /// Targets with resolved `from` values.
    pub targets: Vec<ScheduledTarget>,
}

#[derive(Clone, Copy, Debug, Default)]
struct Clock {
    time: f64,
    running: bool,
    ticked: bool,
}

/// Tween schedule plus live clock over an owned [`ReelState`].
pub struct Timeline {
    initial: ReelState,
    state: ReelState,
    tweens: Vec<Tween>,
    labels: BTreeMap<String, f64>,
    cursor_start: f64,
    cursor_end: f64,
    next_id: usize,
    resolved: Option<Resolved>,
    clock: Clock,
    on_tick: Option<TickCallback>,
}

impl std::fmt::Debug for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("tweens", &self.tweens.len())
            .field("labels", &self.labels)
            .field("time", &self.clock.time)
            .field("running", &self.clock.running)
            .finish()
    }
}

impl Timeline {
    /// Empty timeline owning `initial` as its t = 0 baseline.
    pub fn new(initial: ReelState) -> Self {
        Self {
            state: initial.clone(),
            initial,
            tweens: Vec::new(),
            labels: BTreeMap::new(),
            cursor_start: 0.0,
            cursor_end: 0.0,
            next_id: 0,
            resolved: None,
            clock: Clock::default(),
            on_tick: None,
        }
    }

    fn resolve_anchor(&self, anchor: &Anchor) -> ReelResult<f64> {
        let t = match anchor {
            Anchor::Absolute(t) => *t,
            Anchor::AfterPrevious(gap) => self.cursor_end + gap,
            Anchor::WithPrevious(offset) => self.cursor_start + offset,
            Anchor::AfterLabel(name, gap) => {
                let at = self
                    .labels
                    .get(name)
                    .ok_or_else(|| ReelError::timeline(format!("unknown label \"{name}\"")))?;
                at + gap
            }
        };
        if !t.is_finite() {
            return Err(ReelError::timeline(format!(
                "anchor {anchor:?} resolves to a non-finite time"
            )));
        }
        if t < 0.0 {
            return Err(ReelError::timeline(format!(
                "anchor {anchor:?} resolves to negative start time {t}"
            )));
        }
        Ok(t)
    }

    fn check_targets(&self, targets: &[(Field, Value)], duration: f64) -> ReelResult<()> {
        for (field, value) in targets {
            self.initial.check_field(*field)?;
            if field.kind() != value.kind() {
                return Err(ReelError::timeline(format!(
                    "field {field:?} expects {:?} but got {value:?}",
                    field.kind()
                )));
            }
            if field.kind() == FieldKind::Flag && duration > 0.0 {
                return Err(ReelError::timeline(format!(
                    "flag field {field:?} can only be written by a zero-duration set"
                )));
            }
            if let Value::Num(v) = value
                && !v.is_finite()
            {
                return Err(ReelError::timeline(format!(
                    "field {field:?} end value must be finite"
                )));
            }
        }
        Ok(())
    }

    fn check_overlap(&self, targets: &[(Field, Value)], start: f64, duration: f64) -> ReelResult<()> {
        let end = start + duration;
        for (field, _) in targets.iter().filter(|(f, _)| !f.is_opacity()) {
            for other in &self.tweens {
                if !other.targets.iter().any(|(f, _)| f == field) {
                    continue;
                }
                if start < other.end() && other.start < end {
                    return Err(ReelError::timeline(format!(
                        "tween on {field:?} at [{start}, {end}] overlaps tween {} at [{}, {}]",
                        other.id.0,
                        other.start,
                        other.end()
                    )));
                }
            }
        }
        Ok(())
    }

    fn push(&mut self, tween: Tween) {
        self.cursor_start = tween.start;
        self.cursor_end = tween.end();
        self.tweens.push(tween);
        self.resolved = None;
    }

    /// Validate and append a tween; its anchor is resolved now against the cursor.
    ///
    /// A spec without targets acts as a spacer: it only extends the schedule.
    pub fn append(&mut self, spec: TweenSpec) -> ReelResult<TweenId> {
        let TweenSpec {
            targets,
            duration,
            ease,
            anchor,
            observer,
        } = spec;
        if !duration.is_finite() || duration < 0.0 {
            return Err(ReelError::timeline(format!(
                "tween duration must be finite and >= 0, got {duration}"
            )));
        }
        self.check_targets(&targets, duration)?;
        let start = self.resolve_anchor(&anchor)?;
        self.check_overlap(&targets, start, duration)?;

        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.push(Tween {
            id,
            start,
            duration,
            ease,
            targets,
            observer,
        });
        Ok(id)
    }

    /// Nest `child`'s schedule shifted by the resolved `anchor`.
    ///
    /// Child labels are carried over, shifted. The cursor then spans the whole child.
    pub fn add(&mut self, child: Timeline, anchor: Anchor) -> ReelResult<()> {
        let offset = self.resolve_anchor(&anchor)?;
        let child_total = child.total_duration();
        if let Some(name) = child.labels.keys().find(|n| self.labels.contains_key(*n)) {
            return Err(ReelError::timeline(format!("duplicate label \"{name}\"")));
        }
        for tween in &child.tweens {
            self.check_targets(&tween.targets, tween.duration)?;
            self.check_overlap(&tween.targets, offset + tween.start, tween.duration)?;
        }

        for (name, at) in child.labels {
            self.labels.insert(name, offset + at);
        }
        for mut tween in child.tweens {
            tween.start += offset;
            tween.id = TweenId(self.next_id);
            self.next_id += 1;
            self.tweens.push(tween);
        }
        self.cursor_start = offset;
        self.cursor_end = offset + child_total;
        self.resolved = None;
        Ok(())
    }

    /// Record a named time point for [`Anchor::AfterLabel`]. Does not move the cursor.
    pub fn add_label(&mut self, name: impl Into<String>, anchor: Anchor) -> ReelResult<f64> {
        let name = name.into();
        if self.labels.contains_key(&name) {
            return Err(ReelError::timeline(format!("duplicate label \"{name}\"")));
        }
        let at = self.resolve_anchor(&anchor)?;
        tracing::debug!(label = %name, at, "timeline label");
        self.labels.insert(name, at);
        Ok(at)
    }

    /// Time of a named label, if present.
    pub fn label_time(&self, name: &str) -> Option<f64> {
        self.labels.get(name).copied()
    }

    /// Labels in name order.
    pub fn labels(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// End time of the previously appended item.
    pub fn cursor(&self) -> f64 {
        self.cursor_end
    }

    /// Max over tweens of `start + duration`; labels do not extend it.
    pub fn total_duration(&self) -> f64 {
        self.tweens.iter().map(Tween::end).fold(0.0, f64::max)
    }

    /// Number of scheduled tweens.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// True when nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Immutable t = 0 baseline.
    pub fn initial(&self) -> &ReelState {
        &self.initial
    }

    /// State as of the last seek/tick.
    pub fn state(&self) -> &ReelState {
        &self.state
    }

    fn target_value(from: Value, to: Value, eased: f64) -> Value {
        match (from, to) {
            (Value::Num(a), Value::Num(b)) => Value::Num(lerp(a, b, eased)),
            (_, to) => to,
        }
    }

    fn apply_tween(state: &mut ReelState, tween: &Tween, from: &[Value], t: f64) -> ReelResult<()> {
        let e = tween.ease.apply(tween.progress(t));
        for ((field, to), from) in tween.targets.iter().zip(from) {
            state.set(*field, Self::target_value(*from, *to, e))?;
        }
        Ok(())
    }

    /// Resolve `from` values in one pass over the start-sorted tweens.
    ///
    /// The value of a field at an instant is written by the last tween in start order that
    /// targets it, so only that writer needs evaluating.
    fn resolve(&mut self) -> ReelResult<()> {
        if self.resolved.is_none() {
            let mut order: Vec<usize> = (0..self.tweens.len()).collect();
            order.sort_by(|&a, &b| self.tweens[a].start.total_cmp(&self.tweens[b].start));

            let mut from: Vec<Vec<Value>> = vec![Vec::new(); self.tweens.len()];
            let mut writer: HashMap<Field, (usize, usize)> = HashMap::new();
            for &idx in &order {
                let tween = &self.tweens[idx];
                let mut values = Vec::with_capacity(tween.targets.len());
                for (field, _) in &tween.targets {
                    let value = match writer.get(field) {
                        Some(&(w, slot)) => {
                            let prev = &self.tweens[w];
                            let e = prev.ease.apply(prev.progress(tween.start));
                            Self::target_value(from[w][slot], prev.targets[slot].1, e)
                        }
                        None => self.initial.get(*field)?,
                    };
                    values.push(value);
                }
                from[idx] = values;
                for (slot, (field, _)) in tween.targets.iter().enumerate() {
                    writer.insert(*field, (idx, slot));
                }
            }
            tracing::debug!(tweens = self.tweens.len(), "timeline schedule resolved");
            self.resolved = Some(Resolved { order, from });
        }
        Ok(())
    }

    fn state_at(&mut self, t: f64) -> ReelResult<ReelState> {
        self.resolve()?;
        let mut state = self.initial.clone();
        if let Some(resolved) = &self.resolved {
            for &idx in &resolved.order {
                let tween = &self.tweens[idx];
                if tween.start > t {
                    break;
                }
                Self::apply_tween(&mut state, tween, &resolved.from[idx], t)?;
            }
        }
        Ok(state)
    }

    /// Recompute the state at `t` from the initial state. Does not touch the live clock.
    pub fn seek(&mut self, t: f64) -> ReelResult<&ReelState> {
        if !t.is_finite() {
            return Err(ReelError::timeline(format!("cannot seek to {t}")));
        }
        self.state = self.state_at(t.max(0.0))?;
        Ok(&self.state)
    }

    /// Flat, serializable list of resolved tweens in start order.
    pub fn schedule(&mut self) -> ReelResult<Vec<ScheduledTween>> {
        self.resolve()?;
        let Some(resolved) = &self.resolved else {
            return Ok(Vec::new());
        };
        Ok(resolved
            .order
            .iter()
            .map(|&idx| {
                let tween = &self.tweens[idx];
                ScheduledTween {
                    id: tween.id,
                    start: tween.start,
                    duration: tween.duration,
                    ease: tween.ease,
                    targets: tween
                        .targets
                        .iter()
                        .zip(&resolved.from[idx])
                        .map(|((field, to), from)| ScheduledTarget {
                            field: *field,
                            from: *from,
                            to: *to,
                        })
                        .collect(),
                }
            })
            .collect())
    }

    /// Register the tick callback `(elapsed_secs, state)`.
    pub fn set_on_tick(&mut self, callback: impl FnMut(f64, &ReelState) + 'static) {
        self.on_tick = Some(Box::new(callback));
    }

    /// Start (or resume) the live clock.
    pub fn play(&mut self) {
        self.clock.running = true;
    }

    /// Pause the live clock.
    pub fn pause(&mut self) {
        self.clock.running = false;
    }

    /// Reset to t = 0, apply that state (invoking the tick callback once), then run.
    pub fn restart(&mut self) -> ReelResult<()> {
        self.clock.time = 0.0;
        self.clock.ticked = false;
        self.seek(0.0)?;
        if let Some(cb) = self.on_tick.as_mut() {
            cb(0.0, &self.state);
        }
        self.clock.running = true;
        Ok(())
    }

    /// Live clock position in seconds.
    pub fn time(&self) -> f64 {
        self.clock.time
    }

    /// Whether the live clock is running.
    pub fn is_running(&self) -> bool {
        self.clock.running
    }

    /// Advance the running clock by `dt` seconds and apply the resulting state.
    ///
    /// Returns whether the clock is still running afterwards. Paused or finished timelines
    /// ignore ticks.
    pub fn tick(&mut self, dt: f64) -> ReelResult<bool> {
        if !self.clock.running {
            return Ok(false);
        }
        let total = self.total_duration();
        let prev = self.clock.time;
        let now = (prev + dt.max(0.0)).min(total);
        self.clock.time = now;
        self.state = self.state_at(now)?;

        // Sets fire once: when the clock crosses them, or on the first tick for those at `prev`.
        let first = !self.clock.ticked;
        self.clock.ticked = true;
        for tween in &mut self.tweens {
            let active = if tween.duration > 0.0 {
                tween.start <= now && tween.end() > prev
            } else {
                tween.start <= now && (tween.start > prev || (first && tween.start >= prev))
            };
            if !active {
                continue;
            }
            let p = if tween.duration > 0.0 {
                unit((now - tween.start) / tween.duration)
            } else {
                1.0
            };
            if let Some(observer) = tween.observer.as_mut() {
                observer(p, &self.state);
            }
        }
        if let Some(cb) = self.on_tick.as_mut() {
            cb(now, &self.state);
        }
        if now >= total {
            self.clock.running = false;
        }
        Ok(self.clock.running)
    }

    /// Stop the clock and release all tweens, labels and callbacks. Idempotent.
    pub fn kill(&mut self) {
        self.clock = Clock::default();
        self.tweens.clear();
        self.labels.clear();
        self.on_tick = None;
        self.resolved = None;
        self.cursor_start = 0.0;
        self.cursor_end = 0.0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
