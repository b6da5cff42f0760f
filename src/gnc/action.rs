use super::module::Rig;
use crate::helpers::command_action;

// ---------------------------------------------------------------------------
// Named actions: optional initializer + optional per-tick executor
// ---------------------------------------------------------------------------

/// Runs once when the action is selected, with the command's residual tokens.
pub type Initializer<S> = fn(&mut S, &mut Rig<'_>, &[String]);

/// Runs every tick while the action is active.
pub type Executor<S> = fn(&mut S, &mut Rig<'_>) -> Step;

/// Outcome of one executor run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// Hand over to another registered action (no arguments).
    Switch(&'static str),
}

pub struct Action<S> {
    pub name: String,
    pub initialize: Option<Initializer<S>>,
    pub execute: Option<Executor<S>>,
}

/// Mode state that reacts to action selection.
pub trait ActionHost: Sized {
    fn on_activated(&mut self, _action: &Action<Self>, _rig: &mut Rig<'_>) {}
}

/// Registered actions, the active one, and the tick's status lines.
pub struct ActionTable<S> {
    actions: Vec<Action<S>>,
    active: Option<usize>,
    print_buffer: String,
}

impl<S: ActionHost> ActionTable<S> {
    pub fn new() -> Self {
        Self { actions: Vec::new(), active: None, print_buffer: String::new() }
    }

    /// Register an action. Names are case-insensitive.
    ///
    /// # Panics
    /// If `name` is already registered.
    pub fn add_action(
        &mut self,
        name: &str,
        initialize: Option<Initializer<S>>,
        execute: Option<Executor<S>>,
    ) {
        let name = name.to_lowercase();
        assert!(self.find(&name).is_none(), "action '{}' registered twice", name);
        self.actions.push(Action { name, initialize, execute });
    }

    /// Make `name` active, run its initializer, then the host's activation
    /// hook. Unknown names change nothing and return false.
    pub fn set_active(
        &mut self,
        name: &str,
        args: &[String],
        host: &mut S,
        rig: &mut Rig<'_>,
    ) -> bool {
        let Some(idx) = self.find(&name.to_lowercase()) else {
            return false;
        };
        self.active = Some(idx);
        let action = &self.actions[idx];
        tracing::debug!(action = %action.name, ?args, "action selected");
        if let Some(init) = action.initialize {
            init(host, rig, args);
        }
        host.on_activated(action, rig);
        true
    }

    /// Select the action named by a tokenized command: token 1 names the
    /// action, tokens 2.. are its arguments.
    pub fn process_command(&mut self, args: &[&str], host: &mut S, rig: &mut Rig<'_>) -> bool {
        let name = command_action(args);
        let rest: Vec<String> = args.iter().skip(2).map(|s| s.to_string()).collect();
        let selected = self.set_active(&name, &rest, host, rig);
        if !selected {
            tracing::warn!(action = %name, "unknown action ignored");
        }
        selected
    }

    /// Run the active executor once, following any hand-over it requests.
    /// Returns false when there was nothing to run.
    pub fn execute(&mut self, host: &mut S, rig: &mut Rig<'_>) -> bool {
        let Some(exec) = self.executor() else {
            return false;
        };
        if let Step::Switch(next) = exec(host, rig) {
            self.set_active(next, &[], host, rig);
        }
        true
    }

    pub fn active(&self) -> Option<&Action<S>> {
        self.active.map(|i| &self.actions[i])
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active().map(|a| a.name.as_str())
    }

    pub fn executor(&self) -> Option<Executor<S>> {
        self.active().and_then(|a| a.execute)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|a| a.name.as_str())
    }

    /// Start a new tick: drop last tick's status lines.
    pub fn begin_tick(&mut self) {
        self.print_buffer.clear();
    }

    pub fn print_line(&mut self, line: &str) {
        self.print_buffer.push_str(line);
        self.print_buffer.push('\n');
    }

    pub fn status_text(&self) -> &str {
        &self.print_buffer
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.actions.iter().position(|a| a.name == name)
    }
}

impl<S: ActionHost> Default for ActionTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gnc::GyroController;
    use crate::sim::SimShip;

    #[derive(Default)]
    struct Counter {
        inits: Vec<Vec<String>>,
        runs: u32,
        activated: Vec<String>,
    }

    impl ActionHost for Counter {
        fn on_activated(&mut self, action: &Action<Self>, rig: &mut Rig<'_>) {
            self.activated.push(action.name.clone());
            rig.gyros.set_override(action.execute.is_some());
        }
    }

    fn record_args(c: &mut Counter, _rig: &mut Rig<'_>, args: &[String]) {
        c.inits.push(args.to_vec());
    }

    fn count_to_three(c: &mut Counter, _rig: &mut Rig<'_>) -> Step {
        c.runs += 1;
        if c.runs >= 3 {
            Step::Switch("idle")
        } else {
            Step::Continue
        }
    }

    fn table() -> ActionTable<Counter> {
        let mut t: ActionTable<Counter> = ActionTable::new();
        t.add_action("idle", None, None);
        t.add_action("count", Some(record_args), Some(count_to_three));
        t
    }

    #[test]
    fn starts_with_no_active_action() {
        let t = table();
        assert!(t.active().is_none());
        assert!(t.executor().is_none());
        assert_eq!(t.names().collect::<Vec<_>>(), vec!["idle", "count"]);
    }

    #[test]
    fn selection_runs_initializer_then_hook() {
        let mut t = table();
        let mut c = Counter::default();
        let mut gyros = GyroController::new(vec![], 0.2);
        let mut ship = SimShip::default();
        let mut rig = Rig { gyros: &mut gyros, ship: &mut ship };

        assert!(t.process_command(&["mode", "COUNT", "30", "x"], &mut c, &mut rig));
        assert_eq!(t.active_name(), Some("count"));
        assert_eq!(c.inits, vec![vec!["30".to_string(), "x".to_string()]]);
        assert_eq!(c.activated, vec!["count"]);
        assert!(rig.gyros.is_override());
    }

    #[test]
    fn unknown_action_keeps_previous() {
        let mut t = table();
        let mut c = Counter::default();
        let mut gyros = GyroController::new(vec![], 0.2);
        let mut ship = SimShip::default();
        let mut rig = Rig { gyros: &mut gyros, ship: &mut ship };

        t.set_active("count", &[], &mut c, &mut rig);
        assert!(!t.process_command(&["mode", "warp"], &mut c, &mut rig));
        assert!(!t.process_command(&["mode"], &mut c, &mut rig));
        assert_eq!(t.active_name(), Some("count"));
        assert_eq!(c.activated.len(), 1);
    }

    #[test]
    fn executor_can_hand_over() {
        let mut t = table();
        let mut c = Counter::default();
        let mut gyros = GyroController::new(vec![], 0.2);
        let mut ship = SimShip::default();
        let mut rig = Rig { gyros: &mut gyros, ship: &mut ship };

        t.set_active("count", &[], &mut c, &mut rig);
        assert!(t.execute(&mut c, &mut rig));
        assert!(t.execute(&mut c, &mut rig));
        assert_eq!(t.active_name(), Some("count"));
        assert!(t.execute(&mut c, &mut rig));
        assert_eq!(t.active_name(), Some("idle"));
        assert!(!rig.gyros.is_override());
        // idle has no executor
        assert!(!t.execute(&mut c, &mut rig));
        assert_eq!(c.runs, 3);
    }

    #[test]
    fn status_buffer_resets_each_tick() {
        let mut t = table();
        t.print_line("one");
        t.print_line("two");
        assert_eq!(t.status_text(), "one\ntwo\n");
        t.begin_tick();
        assert_eq!(t.status_text(), "");
    }

    #[test]
    #[should_panic(expected = "registered twice")]
    fn duplicate_names_panic() {
        let mut t = table();
        t.add_action("IDLE", None, None);
    }
}
