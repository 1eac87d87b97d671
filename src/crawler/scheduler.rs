//! Scheduler for managing the crawl frontier and visited set
//!
//! This module handles:
//! - Priority queue management for URLs to crawl
//! - Deduplication against queued and already visited URLs
//! - Moving URLs into the visited set as they are popped

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// A URL queued for fetching with priority information
#[derive(Debug, Clone)]
pub struct QueuedUrl {
    /// The URL to fetch
    pub url: String,

    /// Priority value (higher is popped first)
    pub priority: u32,

    /// Insertion sequence, breaks ties in favor of earlier URLs
    sequence: u64,
}

// Higher priority first, then lower sequence first
impl Ord for QueuedUrl {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueuedUrl {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueuedUrl {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.sequence == other.sequence
    }
}

impl Eq for QueuedUrl {}

/// URLs that have been popped for processing
///
/// Grows monotonically; there is no removal.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Adds a URL, returning false if it was already present
    pub fn add(&mut self, url: &str) -> bool {
        self.urls.insert(url.to_string())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Scheduler owns the frontier and the visited set
///
/// Invariants:
/// - no two frontier entries share a URL
/// - no frontier entry's URL is in the visited set
pub struct Scheduler {
    /// Frontier priority queue of URLs to fetch
    frontier: BinaryHeap<QueuedUrl>,

    /// URLs currently in the frontier
    queued: HashSet<String>,

    /// URLs already popped
    visited: VisitedSet,

    next_sequence: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// Creates an empty scheduler
    pub fn new() -> Self {
        Self {
            frontier: BinaryHeap::new(),
            queued: HashSet::new(),
            visited: VisitedSet::new(),
            next_sequence: 0,
        }
    }

    /// Adds a URL to the frontier
    ///
    /// Does nothing if the URL is already queued or already visited.
    ///
    /// # Returns
    ///
    /// `true` if the URL was inserted
    pub fn push(&mut self, url: &str, priority: u32) -> bool {
        if self.visited.contains(url) || self.queued.contains(url) {
            return false;
        }

        self.queued.insert(url.to_string());
        self.frontier.push(QueuedUrl {
            url: url.to_string(),
            priority,
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;

        true
    }

    /// Removes the highest-priority URL and marks it visited
    pub fn pop(&mut self) -> Option<QueuedUrl> {
        let queued = self.frontier.pop()?;
        self.queued.remove(&queued.url);
        self.visited.add(&queued.url);

        tracing::trace!(
            "Popped {} (priority {}), {} left in frontier",
            queued.url,
            queued.priority,
            self.frontier.len()
        );

        Some(queued)
    }

    /// Returns whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Returns the number of URLs in the frontier
    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    /// Returns true if the URL is waiting in the frontier
    pub fn is_queued(&self, url: &str) -> bool {
        self.queued.contains(url)
    }

    /// Returns true if the URL has already been popped
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Returns the visited set
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }
}
