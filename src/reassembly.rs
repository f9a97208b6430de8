//! Reassembly of messages split across several sentences.
//!
//! Long messages are carried by up to nine sentences sharing a sequence ID.
//! [`FragmentReassembler`] buffers fragments until every part of a message
//! has arrived, then releases them in part order. Fragments of messages that
//! never complete are evicted once older than the configured timeout.
//! Eviction is lazy: it runs whenever a multi-part fragment is added, or on
//! demand through [`FragmentReassembler::sweep`].
//!
//! _Requires Cargo feature `reassembly`._

use std::{
    cell::Cell,
    collections::BTreeMap,
    num::ParseIntError,
    ops::Sub,
    rc::Rc,
    string::{String, ToString},
    time::{Duration, Instant},
    vec,
    vec::Vec,
};

use serde::{Deserialize, Deserializer, de::Error as _};
use thiserror::Error;

/// A source of monotonic time.
pub trait Clock {
    /// A point in time, which subtracted from a later one gives the time
    /// elapsed.
    type Instant: Copy + Ord + Sub<Output = Duration>;

    /// The current time. Never earlier than a previously returned time.
    fn now(&self) -> Self::Instant;
}

/// The system's monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that moves only when advanced, measuring time since its
/// creation. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Rc<Cell<Duration>>);

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

impl Clock for ManualClock {
    type Instant = Duration;

    fn now(&self) -> Duration {
        self.0.get()
    }
}

/// Reassembler settings.
///
/// Deserializes from a map with an optional `timeout` in (possibly
/// fractional) seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReassemblyConfig {
    /// Age beyond which an incomplete message is discarded.
    #[serde(deserialize_with = "seconds")]
    pub timeout: Duration,
}

impl Default for ReassemblyConfig {
    fn default() -> Self {
        ReassemblyConfig {
            timeout: Duration::from_secs(60),
        }
    }
}

fn seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    Duration::try_from_secs_f64(f64::deserialize(deserializer)?).map_err(D::Error::custom)
}

/// An error reading the fragment header of a sentence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedSentence {
    /// Fewer fields than a fragment header and payload require.
    #[error("Expected at least 7 fields, found {0}.")]
    TooFewFields(usize),
    /// The part count or part number is not an integer.
    #[error("Invalid {field} ({value:?}): {source}")]
    InvalidCounter {
        field: &'static str,
        value: String,
        source: ParseIntError,
    },
    /// The part number is zero or exceeds the part count.
    #[error("Part {part} of {total} is out of range.")]
    PartOutOfRange { part: u8, total: u8 },
}

/// Identifies the fragments of one message.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReassemblyKey {
    pub sequence_id: String,
    pub channel: Option<char>,
    pub total_parts: u8,
}

/// A sentence received as part of a message, with the host's annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment<I, T> {
    pub sentence: String,
    pub identifier: I,
    pub timestamp: T,
}

/// Every fragment of a message, in part order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembled<I, T> {
    pub fragments: Vec<Fragment<I, T>>,
    /// Timestamp of the fragment that completed the message.
    pub timestamp: T,
}

impl<I, T> Assembled<I, T> {
    pub fn sentences(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().map(|f| f.sentence.as_str())
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &I> {
        self.fragments.iter().map(|f| &f.identifier)
    }
}

struct Pending<I, T, N> {
    created: N,
    parts: BTreeMap<u8, Fragment<I, T>>,
}

/// Buffers sentence fragments until their message is complete.
///
/// `I` identifies a sentence to the host (a database row, a line number),
/// and `T` is the host's receive timestamp. Neither is interpreted.
pub struct FragmentReassembler<I, T, C: Clock = SystemClock> {
    config: ReassemblyConfig,
    clock: C,
    pending: BTreeMap<ReassemblyKey, Pending<I, T, C::Instant>>,
}

impl<I, T> FragmentReassembler<I, T> {
    pub fn new(config: ReassemblyConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<I, T, C: Clock> FragmentReassembler<I, T, C> {
    pub fn with_clock(config: ReassemblyConfig, clock: C) -> Self {
        FragmentReassembler {
            config,
            clock,
            pending: BTreeMap::new(),
        }
    }

    /// Add a sentence, returning the whole message if this completes it.
    ///
    /// Single-part sentences complete immediately without touching the
    /// buffer. A repeated part number replaces the earlier fragment.
    pub fn add(
        &mut self,
        sentence: &str,
        identifier: I,
        timestamp: T,
    ) -> Result<Option<Assembled<I, T>>, MalformedSentence>
    where
        T: Clone,
    {
        let (key, part) = parse_header(sentence).inspect_err(|error| {
            tracing::debug!(%error, sentence, "malformed fragment");
        })?;

        let fragment = Fragment {
            sentence: sentence.to_string(),
            identifier,
            timestamp: timestamp.clone(),
        };

        if key.total_parts == 1 {
            return Ok(Some(Assembled {
                fragments: vec![fragment],
                timestamp,
            }));
        }

        self.sweep();

        let now = self.clock.now();
        let total = usize::from(key.total_parts);

        let pending = self.pending.entry(key.clone()).or_insert_with(|| Pending {
            created: now,
            parts: BTreeMap::new(),
        });
        pending.parts.insert(part, fragment);

        if pending.parts.len() < total {
            tracing::trace!(
                sequence_id = %key.sequence_id,
                part,
                total,
                "buffered fragment"
            );
            return Ok(None);
        }

        let fragments = self
            .pending
            .remove(&key)
            .map(|pending| pending.parts.into_values().collect())
            .unwrap_or_default();

        Ok(Some(Assembled {
            fragments,
            timestamp,
        }))
    }

    /// Discard messages older than the timeout, returning the identifiers
    /// of their fragments.
    pub fn sweep(&mut self) -> Vec<I> {
        let now = self.clock.now();
        let timeout = self.config.timeout;

        let expired: Vec<ReassemblyKey> = self
            .pending
            .iter()
            .filter(|(_, pending)| now - pending.created > timeout)
            .map(|(key, _)| key.clone())
            .collect();

        let mut lost = Vec::new();
        for key in expired {
            if let Some(pending) = self.pending.remove(&key) {
                tracing::debug!(
                    sequence_id = %key.sequence_id,
                    channel = ?key.channel,
                    parts = pending.parts.len(),
                    total = key.total_parts,
                    "evicted incomplete message"
                );
                lost.extend(pending.parts.into_values().map(|f| f.identifier));
            }
        }

        lost
    }

    /// Identifiers of every buffered fragment.
    pub fn incomplete(&self) -> impl Iterator<Item = &I> {
        self.pending
            .values()
            .flat_map(|pending| pending.parts.values().map(|f| &f.identifier))
    }

    /// Number of incomplete messages buffered.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn config(&self) -> &ReassemblyConfig {
        &self.config
    }
}

/// Read the reassembly key and part number from a sentence's fields:
/// `[1]` part count, `[2]` part number, `[3]` sequence ID, `[4]` channel.
fn parse_header(sentence: &str) -> Result<(ReassemblyKey, u8), MalformedSentence> {
    let fields: Vec<&str> = sentence.split(',').collect();

    if fields.len() < 7 {
        Err(MalformedSentence::TooFewFields(fields.len()))?;
    }

    let counter = |field: &'static str, value: &str| {
        value
            .trim()
            .parse::<u8>()
            .map_err(|source| MalformedSentence::InvalidCounter {
                field,
                value: value.to_string(),
                source,
            })
    };

    let total = counter("part count", fields[1])?;
    let part = counter("part number", fields[2])?;

    if part == 0 || part > total {
        Err(MalformedSentence::PartOutOfRange { part, total })?;
    }

    let key = ReassemblyKey {
        sequence_id: fields[3].to_string(),
        channel: fields[4].chars().next(),
        total_parts: total,
    };

    Ok((key, part))
}
