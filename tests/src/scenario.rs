//! Scenario definition and runner.

use ontoc_core::Identifier;
use ontoc_session::{Session, SessionOptions, SessionResult};

use crate::assertion::{Assertion, AssertionBuilder};
use crate::error::{ScenarioError, ScenarioResult};

/// Definitions run before the first step.
pub type Setup = fn(&mut Session) -> SessionResult<()>;

type StepAction = Box<dyn Fn(&mut Session) -> SessionResult<Identifier>>;

/// A step in a scenario with its assertion.
pub struct Step {
    /// Step name (for reporting).
    pub name: String,
    action: StepAction,
    /// Assertion to verify the result.
    pub assertion: Assertion,
}

/// A complete test scenario: a session, its setup and a list of action steps.
pub struct Scenario {
    /// Scenario name (for reporting).
    name: String,
    options: SessionOptions,
    setup: Vec<Setup>,
    steps: Vec<Step>,
}

impl Scenario {
    /// Create a new scenario in the `com.example` namespace.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: SessionOptions::new().with_namespace("com.example"),
            setup: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Replace the session options.
    pub fn options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    /// Run `setup` before the steps. Repeatable; runs in order.
    pub fn setup(mut self, setup: Setup) -> Self {
        self.setup.push(setup);
        self
    }

    /// Add a step defining one action, with an assertion on the result.
    pub fn step<A, F>(mut self, name: impl Into<String>, action: A, assertion_fn: F) -> Self
    where
        A: Fn(&mut Session) -> SessionResult<Identifier> + 'static,
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        let assertion = assertion_fn(AssertionBuilder::new()).build();
        self.steps.push(Step {
            name: name.into(),
            action: Box::new(action),
            assertion,
        });
        self
    }

    /// Get the scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the steps.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run the scenario and return the session for further inspection.
    ///
    /// A failing step must leave the session exactly as it found it.
    pub fn run(&self) -> ScenarioResult<Session> {
        crate::init_tracing();

        let mut session = Session::new(self.options.clone())
            .map_err(|e| ScenarioError::session_start(&self.name, e.to_string()))?;
        for setup in &self.setup {
            setup(&mut session).map_err(|e| ScenarioError::setup(&self.name, e.to_string()))?;
        }

        for step in &self.steps {
            let before = session.dump();
            let result = (step.action)(&mut session).map_err(|e| e.to_string());
            if result.is_err() && session.dump() != before {
                return Err(ScenarioError::partial_registration(&step.name));
            }
            step.assertion
                .verify(&step.name, &result, session.registry())?;
        }
        Ok(session)
    }
}
