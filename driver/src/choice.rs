//! Battle choices and legal-choice derivation.

use std::fmt;

use porygon_protocol::Request;

/// A single submittable battle choice.
///
/// Slot numbers are the server's 1-based indices: move slots 1-4 on the
/// active pokemon, switch targets 2-6 in request side order (slot 1 is the
/// active pokemon and never a switch target).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Use the move in the given slot (1-4).
    Move(u8),
    /// Switch to the pokemon in the given slot (2-6).
    Switch(u8),
    /// Lead with the pokemon in the given slot (team preview only).
    Team(u8),
}

impl Choice {
    pub fn is_move(&self) -> bool {
        matches!(self, Choice::Move(_))
    }

    pub fn is_switch(&self) -> bool {
        matches!(self, Choice::Switch(_))
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Move(slot) => write!(f, "move {slot}"),
            Choice::Switch(slot) => write!(f, "switch {slot}"),
            Choice::Team(slot) => write!(f, "team {slot}"),
        }
    }
}

/// Enumerate the legal choices for a decision request, moves before
/// switches.
///
/// Team-preview requests offer one lead pick per healthy team member.
/// Force-switch requests offer only bench switches. A trapped active
/// pokemon offers only moves. A move set with nothing usable (all disabled
/// or out of PP) still offers slot 1: the server fills in Struggle-style
/// fallbacks itself.
pub fn derive_choices(request: &Request) -> Vec<Choice> {
    let mut choices = Vec::new();

    if request.team_preview {
        if let Some(side) = &request.side {
            choices.extend(
                side.pokemon
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| !p.is_fainted())
                    .map(|(index, _)| Choice::Team(index as u8 + 1)),
            );
        }
        return choices;
    }

    let force_switch = request.is_force_switch();

    if !force_switch
        && let Some(slot) = request.active_slot()
    {
        choices.extend(
            slot.available_moves()
                .map(|(index, _)| Choice::Move(index as u8 + 1)),
        );
        if choices.is_empty() && !slot.moves.is_empty() {
            choices.push(Choice::Move(1));
        }
    }

    let can_switch = force_switch
        || request
            .active_slot()
            .map(|slot| slot.can_switch())
            .unwrap_or(true);
    if can_switch && let Some(side) = &request.side {
        choices.extend(
            side.pokemon
                .iter()
                .enumerate()
                .filter(|(_, p)| !p.active && !p.is_fainted())
                .map(|(index, _)| Choice::Switch(index as u8 + 1)),
        );
    }

    choices
}
