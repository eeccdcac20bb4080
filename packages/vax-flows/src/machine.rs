//! Machine trait.
//!
//! Machines are pure state machines that interpret events and decide on commands.
//! State lives inside the machine, and `decide` is synchronous (no IO).
//!
//! # Key Properties
//!
//! - **State is internal**: each machine owns its state via `&mut self`
//! - **Pure decisions**: no IO, no async, just state transitions and command emission
//! - **One event → one command**: returns `Option<Command>`, not `Vec<Command>`
//!
//! The flow that owns a machine executes the commands (backend calls, timers)
//! and feeds the outcome back in as the next event.

/// A state machine that interprets events and decides on commands.
///
/// # Example
///
/// ```
/// use vax_flows::Machine;
///
/// enum DoorEvent { Knock, Leave }
/// enum DoorCommand { Open }
///
/// struct Door { visitors: u32 }
///
/// impl Machine for Door {
///     type Event = DoorEvent;
///     type Command = DoorCommand;
///
///     fn decide(&mut self, event: &DoorEvent) -> Option<DoorCommand> {
///         match event {
///             DoorEvent::Knock => {
///                 self.visitors += 1;
///                 Some(DoorCommand::Open)
///             }
///             DoorEvent::Leave => None,
///         }
///     }
/// }
///
/// let mut door = Door { visitors: 0 };
/// assert!(door.decide(&DoorEvent::Knock).is_some());
/// assert_eq!(door.visitors, 1);
/// ```
pub trait Machine {
    /// The event type this machine handles.
    type Event;

    /// The command type this machine can emit.
    type Command;

    /// Process an event and optionally return a command.
    ///
    /// Called serially by the owning flow; at most one command per event.
    fn decide(&mut self, event: &Self::Event) -> Option<Self::Command>;
}
