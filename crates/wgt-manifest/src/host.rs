//! Content host hook
//!
//! Once a content view has loaded a package's entry document and its script
//! environment is available, the host exposes its scripting bridges to it.
//! [`ContentHost`] tracks content loads so that injection happens exactly
//! once per (re)load, and relays voting errors back into the content through
//! the `voting.onerror` hook.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};

/// Name of the bridge exposing board document operations
pub const BOARD_BRIDGE_NAME: &str = "uniboard";

/// Name of the bridge exposing the voting system
pub const VOTING_BRIDGE_NAME: &str = "voting";

/// An object made visible to content scripts under a fixed name
pub trait ScriptBridge: fmt::Debug {
    fn name(&self) -> &str;
}

/// The script environment of a loaded content view
pub trait ScriptEnvironment {
    /// Expose `bridge` to content scripts as a global named `bridge.name()`
    fn expose_object(&mut self, bridge: Rc<dyn ScriptBridge>);

    /// Run `script` inside the content
    fn evaluate_script(&mut self, script: &str);
}

/// Board document operations, bound to the scene active at injection time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardBridge {
    scene: String,
}

impl BoardBridge {
    pub fn new(scene: impl Into<String>) -> Self {
        BoardBridge {
            scene: scene.into(),
        }
    }

    pub fn scene(&self) -> &str {
        &self.scene
    }
}

impl ScriptBridge for BoardBridge {
    fn name(&self) -> &str {
        BOARD_BRIDGE_NAME
    }
}

/// Voting system bridge
///
/// The voting system reports failures asynchronously; they queue here until
/// the host flushes them into the content.
#[derive(Debug, Default)]
pub struct VotingBridge {
    pending_errors: RefCell<Vec<String>>,
}

impl VotingBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report_error(&self, message: impl Into<String>) {
        self.pending_errors.borrow_mut().push(message.into());
    }

    pub fn take_errors(&self) -> Vec<String> {
        std::mem::take(&mut *self.pending_errors.borrow_mut())
    }
}

impl ScriptBridge for VotingBridge {
    fn name(&self) -> &str {
        VOTING_BRIDGE_NAME
    }
}

/// Escape `value` for use inside a single-quoted JavaScript string literal
pub fn escape_js_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '<' => escaped.push_str("\\x3C"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            c if c.is_control() => escaped.push_str(&format!("\\u{:04X}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Script delivering a voting error to the content's `voting.onerror` hook
pub fn voting_error_script(message: &str) -> String {
    format!(
        "if(voting.onerror) {{ voting.onerror('{}');}}",
        escape_js_string(message)
    )
}

/// Injects host bridges into content script environments
#[derive(Debug)]
pub struct ContentHost {
    active_scene: String,
    generation: u64,
    injected_generation: Option<u64>,
    voting: Option<Rc<VotingBridge>>,
    /// Bridges replaced by a re-injection that content may still report through
    retired_voting: Vec<Weak<VotingBridge>>,
    extra_bridges: Vec<Rc<dyn ScriptBridge>>,
}

impl ContentHost {
    pub fn new(active_scene: impl Into<String>) -> Self {
        ContentHost {
            active_scene: active_scene.into(),
            generation: 0,
            injected_generation: None,
            voting: None,
            retired_voting: Vec::new(),
            extra_bridges: Vec::new(),
        }
    }

    /// Register an additional bridge injected after the built-in ones
    pub fn register_bridge(&mut self, bridge: Rc<dyn ScriptBridge>) {
        self.extra_bridges.push(bridge);
    }

    /// Mark the start of a content (re)load
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn active_scene(&self) -> &str {
        &self.active_scene
    }

    /// Voting bridge of the current injection, if any
    pub fn voting(&self) -> Option<&Rc<VotingBridge>> {
        self.voting.as_ref()
    }

    /// Hook called when the content's script environment is available
    ///
    /// Returns false when the bridges were already injected for the current
    /// load.
    pub fn content_ready(&mut self, env: &mut dyn ScriptEnvironment) -> bool {
        if self.injected_generation == Some(self.generation) {
            debug!("Bridges already injected for load {}", self.generation);
            return false;
        }
        self.inject(env);
        true
    }

    /// The board switched scenes: rebind and re-inject the bridges
    pub fn scene_changed(&mut self, scene: impl Into<String>, env: &mut dyn ScriptEnvironment) {
        self.active_scene = scene.into();
        self.inject(env);
    }

    /// Deliver queued voting errors to the content; returns how many were sent
    ///
    /// Errors reported through bridges from earlier injections that are still
    /// alive are delivered too, before those of the current bridge.
    pub fn flush_voting_errors(&mut self, env: &mut dyn ScriptEnvironment) -> usize {
        self.retired_voting.retain(|bridge| bridge.strong_count() > 0);

        let mut errors: Vec<String> = self
            .retired_voting
            .iter()
            .filter_map(Weak::upgrade)
            .flat_map(|bridge| bridge.take_errors())
            .collect();
        if let Some(voting) = &self.voting {
            errors.extend(voting.take_errors());
        }

        for error in &errors {
            warn!("Voting system error: {}", error);
            env.evaluate_script(&voting_error_script(error));
        }
        errors.len()
    }

    fn inject(&mut self, env: &mut dyn ScriptEnvironment) {
        let voting = Rc::new(VotingBridge::new());

        env.expose_object(Rc::new(BoardBridge::new(self.active_scene.clone())));
        env.expose_object(voting.clone());
        for bridge in &self.extra_bridges {
            env.expose_object(bridge.clone());
        }

        if let Some(previous) = self.voting.replace(voting) {
            if let Some(current) = &self.voting {
                for error in previous.take_errors() {
                    current.report_error(error);
                }
            }
            self.retired_voting.push(Rc::downgrade(&previous));
        }
        self.injected_generation = Some(self.generation);
        debug!(
            "Injected {} bridges for load {}",
            2 + self.extra_bridges.len(),
            self.generation
        );
    }
}
