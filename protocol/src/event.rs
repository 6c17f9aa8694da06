//! Room-scoped event parsing.
//!
//! A server chunk is parsed into a flat, ordered list of [`RoomEvent`]s.
//! After the chunk's lines, exactly one synthetic halt event is appended per
//! room that appeared, marking the block boundary for that room. The halt
//! event has no wire representation; it exists so downstream consumers can
//! tell "no more events for this room until the next chunk" apart from an
//! arbitrary pause in the stream.

use std::collections::HashMap;

/// Event name of the synthetic block-boundary marker.
pub const HALT: &str = "halt";

/// A single parsed protocol event, scoped to a room.
///
/// `args[0]` is the event name; the remaining entries are the positional
/// arguments. Trailing bracket arguments (`[from] item: Leftovers`,
/// `[of] p2a: Skarmory`, bare tags like `[upkeep]`) are lifted out of the
/// positional list into `kwargs`. Immutable once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomEvent {
    /// Room this event belongs to. Empty string = global/lobby.
    pub room_id: String,
    /// Event name followed by positional arguments.
    pub args: Vec<String>,
    /// Bracket-tag keyword arguments. Bare tags map to an empty string.
    pub kwargs: HashMap<String, String>,
}

impl RoomEvent {
    /// Build an event from pre-split parts.
    pub fn new(room_id: impl Into<String>, args: Vec<String>) -> Self {
        let mut positional = Vec::with_capacity(args.len());
        let mut kwargs = HashMap::new();

        for arg in args {
            match split_kwarg(&arg) {
                Some((key, value)) => {
                    kwargs.insert(key.to_string(), value.to_string());
                }
                None => positional.push(arg),
            }
        }

        Self {
            room_id: room_id.into(),
            args: positional,
            kwargs,
        }
    }

    /// The synthetic end-of-block marker for a room.
    pub fn halt(room_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            args: vec![HALT.to_string()],
            kwargs: HashMap::new(),
        }
    }

    /// Event name (`args[0]`), or the empty string for a degenerate event.
    pub fn name(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }

    /// Positional argument by index, counting from after the event name.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index + 1).map(String::as_str)
    }

    /// Keyword argument by bracket tag name (without the brackets).
    pub fn kwarg(&self, key: &str) -> Option<&str> {
        self.kwargs.get(key).map(String::as_str)
    }

    /// Whether this is the synthetic block-boundary marker.
    pub fn is_halt(&self) -> bool {
        self.name() == HALT
    }
}

/// Split a `[key] value` or bare `[key]` argument. Returns `None` for
/// ordinary positional arguments.
fn split_kwarg(arg: &str) -> Option<(&str, &str)> {
    let rest = arg.strip_prefix('[')?;
    let close = rest.find(']')?;
    let key = &rest[..close];
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    let value = rest[close + 1..].trim_start();
    Some((key, value))
}

/// Parse a complete websocket chunk into an ordered list of events.
///
/// An optional leading `>roomid` line scopes every following line to that
/// room (default room is the empty string). Each line is split on `|`; the
/// first segment after the leading empty string is the event name. Lines
/// that do not start with `|`, or that carry no event name, are skipped.
/// One halt event is appended per distinct room id that appeared, in order
/// of first appearance. Parsing is pure: malformed lines are dropped, never
/// fatal.
pub fn parse_chunk(chunk: &str) -> Vec<RoomEvent> {
    let mut events = Vec::new();
    let mut rooms: Vec<String> = Vec::new();
    let mut room_id = String::new();

    let mut lines = chunk.lines().peekable();

    if let Some(first) = lines.peek()
        && let Some(room) = first.strip_prefix('>')
    {
        room_id = room.to_string();
        // The room prefix alone is enough for the room to get a halt marker.
        rooms.push(room_id.clone());
        lines.next();
    }

    for line in lines {
        let Some(event) = parse_line(&room_id, line) else {
            continue;
        };
        if !rooms.contains(&event.room_id) {
            rooms.push(event.room_id.clone());
        }
        events.push(event);
    }

    for room in rooms {
        events.push(RoomEvent::halt(room));
    }

    events
}

/// Parse a single `|`-separated line into an event. Returns `None` for
/// blank, unpiped, or nameless lines.
fn parse_line(room_id: &str, line: &str) -> Option<RoomEvent> {
    if line.is_empty() {
        return None;
    }
    let rest = line.strip_prefix('|')?;

    let args: Vec<String> = rest.split('|').map(str::to_string).collect();
    if args.first().is_none_or(|name| name.is_empty()) {
        return None;
    }

    Some(RoomEvent::new(room_id, args))
}
