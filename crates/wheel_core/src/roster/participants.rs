//! Participant roster
//!
//! Ordered, case-insensitively unique, capped. Insertion order fixes each
//! participant's segment, so the only mutations are append, delete by value
//! and clear.

use super::palette::Palette;
use crate::error::{Result, WheelError};

/// Default roster cap
pub const MAX_PARTICIPANTS: usize = 100;

#[derive(Debug, Clone)]
pub struct Roster {
    names: Vec<String>,
    palette: Palette,
    max_participants: usize,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    pub fn new() -> Self {
        Self::with_capacity_limit(MAX_PARTICIPANTS)
    }

    pub fn with_capacity_limit(max_participants: usize) -> Self {
        Self { names: Vec::new(), palette: Palette::new(), max_participants }
    }

    /// Build a roster from a list, stopping at the first invalid entry.
    pub fn from_names<I, S>(names: I, max_participants: usize) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roster = Self::with_capacity_limit(max_participants);
        for name in names {
            roster.add(name.as_ref())?;
        }
        Ok(roster)
    }

    /// Append a participant. Returns the stored (trimmed) name.
    pub fn add(&mut self, raw: &str) -> Result<&str> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(WheelError::EmptyName);
        }
        if self.contains(name) {
            return Err(WheelError::DuplicateParticipant(name.to_string()));
        }
        if self.names.len() >= self.max_participants {
            return Err(WheelError::CapacityExceeded { max: self.max_participants });
        }

        self.palette.assign(name);
        self.names.push(name.to_string());
        log::debug!("Participant added: {} ({} total)", name, self.names.len());
        Ok(self.names.last().map(String::as_str).unwrap_or_default())
    }

    /// Delete by exact value. Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.names.iter().position(|n| n == name) {
            Some(idx) => {
                self.names.remove(idx);
                log::debug!("Participant removed: {} ({} left)", name, self.names.len());
                true
            }
            None => false,
        }
    }

    /// Drop every participant and forget colour assignments.
    pub fn clear(&mut self) {
        self.names.clear();
        self.palette.reset();
        log::debug!("Roster cleared");
    }

    /// Case-insensitive membership check.
    pub fn contains(&self, name: &str) -> bool {
        let needle = name.to_lowercase();
        self.names.iter().any(|n| n.to_lowercase() == needle)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.names.len() >= self.max_participants
    }

    pub fn max_participants(&self) -> usize {
        self.max_participants
    }

    pub fn color_of(&self, name: &str) -> Option<&'static str> {
        self.palette.get(name)
    }

    /// Segment colour by position, falling back to the palette slot.
    pub fn color_at(&self, index: usize) -> Option<&'static str> {
        self.names.get(index).map(|name| self.palette.color_for(name, index))
    }
}
