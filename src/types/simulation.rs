use serde::{Deserialize, Serialize};

/// Physical state category of a vessel, as reported by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VesselSituation {
    Landed,
    Splashed,
    PreLaunch,
    SubOrbital,
    Orbiting,
    Escaping,
    /// Generic in-flight state (atmospheric flight, falling, etc.).
    Flying,
}

impl VesselSituation {
    /// Wire string stored in the persisted node tree.
    pub fn as_str(&self) -> &'static str {
        match self {
            VesselSituation::Landed => "LANDED",
            VesselSituation::Splashed => "SPLASHED",
            VesselSituation::PreLaunch => "PRELAUNCH",
            VesselSituation::SubOrbital => "SUB_ORBITAL",
            VesselSituation::Orbiting => "ORBITING",
            VesselSituation::Escaping => "ESCAPING",
            VesselSituation::Flying => "FLYING",
        }
    }

    /// Human-readable label combining the situation with the name of the
    /// body the vessel is currently relative to. An empty body name falls
    /// back to the bare situation word.
    pub fn label(&self, body_name: &str) -> String {
        let word = match self {
            VesselSituation::Landed => "Landed",
            VesselSituation::Splashed => "Splashed down",
            VesselSituation::PreLaunch => "Pre-launch",
            VesselSituation::SubOrbital => "Sub-orbital",
            VesselSituation::Orbiting => "Orbiting",
            VesselSituation::Escaping => "Escaping",
            VesselSituation::Flying => "In flight",
        };
        if body_name.is_empty() {
            return word.to_string();
        }
        match self {
            VesselSituation::Landed
            | VesselSituation::Splashed
            | VesselSituation::PreLaunch => format!("{} at {}", word, body_name),
            VesselSituation::SubOrbital | VesselSituation::Flying => {
                format!("{} over {}", word, body_name)
            }
            VesselSituation::Orbiting | VesselSituation::Escaping => {
                format!("{} {}", word, body_name)
            }
        }
    }
}

/// A part of a vessel, identified by its flight id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSnapshot {
    pub flight_id: u32,
    pub name: String,
    pub part_type: String,
}

/// One vessel as seen in the current simulation snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselSnapshot {
    pub persistent_id: u32,
    pub name: String,
    pub vessel_type: String,
    /// Name of the body the vessel is currently relative to.
    pub body_name: String,
    pub situation: VesselSituation,
    pub parts: Vec<PartSnapshot>,
}

impl VesselSnapshot {
    /// Finds a part of this vessel by flight id.
    pub fn part(&self, flight_id: u32) -> Option<&PartSnapshot> {
        self.parts.iter().find(|p| p.flight_id == flight_id)
    }
}

/// An active alarm attached to a vessel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alarm {
    pub id: u32,
    pub vessel_id: u32,
    pub title: String,
}

/// Read-only view of the simulation at one instant. Loaded and unloaded
/// vessels are kept separate because the host streams vessels in and out;
/// right after a save is loaded either set may still be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimSnapshot {
    /// Current simulation clock value.
    pub universal_time: f64,
    pub loaded_vessels: Vec<VesselSnapshot>,
    pub unloaded_vessels: Vec<VesselSnapshot>,
    pub alarms: Vec<Alarm>,
}

impl SimSnapshot {
    /// Looks up a vessel by persistent id, loaded vessels first.
    pub fn find_vessel(&self, persistent_id: u32) -> Option<&VesselSnapshot> {
        self.loaded_vessels
            .iter()
            .chain(self.unloaded_vessels.iter())
            .find(|v| v.persistent_id == persistent_id)
    }

    /// Locates a part by flight id together with its owning vessel,
    /// searching loaded vessels before unloaded ones.
    pub fn find_part(&self, flight_id: u32) -> Option<(&VesselSnapshot, &PartSnapshot)> {
        self.loaded_vessels
            .iter()
            .chain(self.unloaded_vessels.iter())
            .find_map(|v| v.part(flight_id).map(|p| (v, p)))
    }

    /// Whether any active alarm is attached to the given vessel.
    pub fn vessel_has_alarm(&self, vessel_id: u32) -> bool {
        self.alarms.iter().any(|a| a.vessel_id == vessel_id)
    }
}
