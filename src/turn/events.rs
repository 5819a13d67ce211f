//! Narrative events collected while a turn runs

use serde::{Deserialize, Serialize};

use crate::core::types::{RegionId, Turn};
use crate::world::region::{StructureKind, TownTier};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum RegionEvent {
    /// A structure crossed from sound into damaged
    StructureDecay {
        region: RegionId,
        seq: u32,
        kind: StructureKind,
    },
    TownAdvanced {
        region: RegionId,
        name: String,
        tier: TownTier,
    },
    /// A drained town folded up; its markets went with it
    TownDissolved {
        region: RegionId,
        name: String,
    },
    Pillaged {
        region: RegionId,
    },
    MigrationWave {
        from: RegionId,
        to: RegionId,
        migrants: i32,
    },
}

impl RegionEvent {
    /// The region a report about this event is filed under
    pub fn location(&self) -> RegionId {
        match self {
            RegionEvent::StructureDecay { region, .. }
            | RegionEvent::TownAdvanced { region, .. }
            | RegionEvent::TownDissolved { region, .. }
            | RegionEvent::Pillaged { region } => *region,
            RegionEvent::MigrationWave { to, .. } => *to,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TurnEvent {
    pub id: u32,
    pub turn: Turn,
    pub event: RegionEvent,
}

/// The running log of everything noteworthy the engine did
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TurnLog {
    pub events: Vec<TurnEvent>,
    next_event_id: u32,
}

impl TurnLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event(&mut self, event: RegionEvent, turn: Turn) -> u32 {
        let id = self.next_event_id;
        self.next_event_id += 1;
        self.events.push(TurnEvent { id, turn, event });
        id
    }

    pub fn events_for_turn(&self, turn: Turn) -> impl Iterator<Item = &TurnEvent> {
        self.events.iter().filter(move |e| e.turn == turn)
    }

    pub fn events_for_region(&self, region: RegionId) -> impl Iterator<Item = &TurnEvent> {
        self.events
            .iter()
            .filter(move |e| e.event.location() == region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filters_by_turn_and_region() {
        let mut log = TurnLog::new();
        log.add_event(RegionEvent::Pillaged { region: RegionId(1) }, 3);
        log.add_event(
            RegionEvent::MigrationWave {
                from: RegionId(1),
                to: RegionId(2),
                migrants: 40,
            },
            4,
        );
        assert_eq!(log.events_for_turn(3).count(), 1);
        assert_eq!(log.events_for_region(RegionId(2)).count(), 1);
        assert_eq!(log.events_for_region(RegionId(1)).count(), 1);
    }
}
