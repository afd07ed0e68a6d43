use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestChannel {
    Dataset,
    BookmarkLoad,
    BookmarkWrite,
    Listing,
}

/// Generation number of a request within its channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

/// Hands out increasing generations per channel so that only the response to the newest
/// request is applied, no matter the order responses arrive in.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: HashMap<RequestChannel, u64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self { latest: HashMap::new() }
    }

    pub fn begin(&mut self, channel: RequestChannel) -> Generation {
        let next = self.latest.entry(channel).or_insert(0);
        *next += 1;
        Generation(*next)
    }

    pub fn is_current(&self, channel: RequestChannel, generation: Generation) -> bool {
        self.latest.get(&channel).copied() == Some(generation.0)
    }
}
