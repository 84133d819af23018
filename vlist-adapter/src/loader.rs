use vlist::{LoadBatch, VirtualList};

/// A request the host's asynchronous loader should fulfil.
///
/// `generation` must be copied into the resulting [`LoadBatch`]; the engine
/// drops batches whose generation no longer matches (the request was
/// superseded by a reload or clear). Cancelling the in-flight work itself is
/// advisory and up to the loader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadRequest {
    pub generation: u64,
    /// First index whose content is wanted.
    pub start: usize,
    pub count: usize,
}

/// Velocity-driven fetch policy: expensive loads are deferred while the user
/// is flinging and resumed once speed drops or the stream goes idle.
#[derive(Clone, Copy, Debug)]
pub struct LoadGate {
    /// Loads are permitted at or below this smoothed speed (content units per
    /// second, magnitude).
    pub max_speed: f64,
    /// Idle for this long always permits a load, whatever the last measured
    /// speed was.
    pub idle_timeout_ms: u64,
}

impl Default for LoadGate {
    fn default() -> Self {
        Self {
            max_speed: 4000.0,
            idle_timeout_ms: 150,
        }
    }
}

impl LoadGate {
    pub fn permits(&self, list: &VirtualList, now_ms: u64) -> bool {
        if list.velocity().is_idle(now_ms, self.idle_timeout_ms) {
            return true;
        }
        list.velocity().current(now_ms).abs() <= self.max_speed
    }
}

/// Plans loader requests against the engine's loaded prefix and tail.
///
/// One request is outstanding at a time. A generation bump (reload/clear)
/// abandons the outstanding request: its batch will be dropped by the engine
/// anyway, and planning resumes immediately under the new generation.
#[derive(Clone, Debug)]
pub struct LoadPlanner {
    batch_size: usize,
    /// Plan a fetch once the rendered range comes within this many items of
    /// the unloaded region.
    margin: usize,
    gate: LoadGate,
    in_flight: Option<u64>,
}

impl LoadPlanner {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            margin: batch_size.max(1),
            gate: LoadGate::default(),
            in_flight: None,
        }
    }

    pub fn with_margin(mut self, margin: usize) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_gate(mut self, gate: LoadGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Decides whether a load should be issued now.
    ///
    /// Placeholder content inside the addressable range is filled first; once
    /// everything addressable is loaded, the tail is extended while the
    /// source reports more. Returns `None` while a request is outstanding,
    /// while the gate blocks, or when there is nothing to fetch.
    pub fn next_request(&mut self, list: &VirtualList, now_ms: u64) -> Option<LoadRequest> {
        if self.in_flight.is_some_and(|g| g != list.generation()) {
            // Superseded by a reload; the engine will drop its batch.
            self.in_flight = None;
        }
        if self.in_flight.is_some() || !self.gate.permits(list, now_ms) {
            return None;
        }

        let start = if list.loaded_count() < list.count() {
            list.loaded_count()
        } else if list.has_more() {
            list.count()
        } else {
            return None;
        };
        if !self.near_unloaded(list, start) {
            return None;
        }

        self.in_flight = Some(list.generation());
        Some(LoadRequest {
            generation: list.generation(),
            start,
            count: self.batch_size,
        })
    }

    /// Applies a loader result and clears the outstanding request it answers.
    ///
    /// Returns whether the engine accepted the batch (stale generations are
    /// dropped).
    pub fn apply(&mut self, list: &mut VirtualList, batch: LoadBatch) -> bool {
        if self.in_flight == Some(batch.generation) {
            self.in_flight = None;
        }
        list.apply_batch(batch)
    }

    /// Forgets the outstanding request without waiting for its batch.
    pub fn cancel(&mut self) {
        self.in_flight = None;
    }

    fn near_unloaded(&self, list: &VirtualList, boundary: usize) -> bool {
        match list.committed_range() {
            // Nothing rendered yet: load eagerly so there is content at all.
            None => true,
            Some(range) => range.end + self.margin >= boundary,
        }
    }
}
