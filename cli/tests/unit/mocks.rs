//! Shared mock infrastructure for unit tests.
//!
//! Provides a scripted [`EngineRunner`] and an in-memory [`ConfigStore`] so
//! each test file doesn't have to re-define the same boilerplate.

#![allow(clippy::expect_used, dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use eshost_cli::application::ports::{
    ConfigStore, EngineOutput, EngineRunner, EvalOptions, RunningAgent,
};
use eshost_cli::domain::{
    EngineError, EshostConfig, HostDescriptor, HostRegistry, ResultError,
};

// ── Scripted engine ──────────────────────────────────────────────────────────

/// What one host does when dispatched.
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub stdout: String,
    pub thrown: Option<ResultError>,
    pub start_error: Option<String>,
    pub eval_error: Option<String>,
    pub teardown_error: Option<String>,
    pub delay: Duration,
}

impl Script {
    pub fn prints(stdout: &str) -> Self {
        Self {
            stdout: stdout.to_string(),
            ..Self::default()
        }
    }

    pub fn throws(name: &str, message: &str) -> Self {
        Self {
            thrown: Some(ResultError::new(name, message)),
            ..Self::default()
        }
    }

    pub fn fails_to_start(message: &str) -> Self {
        Self {
            start_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn fails_to_evaluate(message: &str) -> Self {
        Self {
            eval_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn fails_teardown(mut self, message: &str) -> Self {
        self.teardown_error = Some(message.to_string());
        self
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Engine runner whose behaviour per host name is fixed up front. Records
/// every lifecycle call as `"<step>:<host>"`.
#[derive(Default)]
pub struct ScriptedRunner {
    scripts: HashMap<String, Script>,
    pub events: Rc<RefCell<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, host: &str, script: Script) -> Self {
        self.scripts.insert(host.to_string(), script);
        self
    }

    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }
}

pub struct ScriptedAgent {
    host: String,
    script: Script,
    events: Rc<RefCell<Vec<String>>>,
}

impl EngineRunner for ScriptedRunner {
    type Agent = ScriptedAgent;

    fn supported_types(&self) -> &[&'static str] {
        &["d8", "jsc", "node", "sm"]
    }

    async fn start(&self, host: &HostDescriptor) -> Result<ScriptedAgent, EngineError> {
        self.events.borrow_mut().push(format!("start:{}", host.name));
        let script = self.scripts.get(&host.name).cloned().unwrap_or_default();
        if let Some(message) = &script.start_error {
            return Err(EngineError::Start(message.clone()));
        }
        Ok(ScriptedAgent {
            host: host.name.clone(),
            script,
            events: Rc::clone(&self.events),
        })
    }
}

impl RunningAgent for ScriptedAgent {
    async fn evaluate(
        &mut self,
        _source: &str,
        _options: EvalOptions,
    ) -> Result<EngineOutput, EngineError> {
        if !self.script.delay.is_zero() {
            tokio::time::sleep(self.script.delay).await;
        }
        self.events.borrow_mut().push(format!("evaluate:{}", self.host));
        if let Some(message) = &self.script.eval_error {
            return Err(EngineError::Evaluation(message.clone()));
        }
        Ok(EngineOutput {
            stdout: self.script.stdout.clone(),
            error: self.script.thrown.clone(),
        })
    }

    async fn destroy(self) -> Result<(), EngineError> {
        self.events.borrow_mut().push(format!("destroy:{}", self.host));
        match self.script.teardown_error {
            Some(message) => Err(EngineError::Teardown(message)),
            None => Ok(()),
        }
    }
}

// ── In-memory config store ───────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryConfigStore {
    config: RefCell<EshostConfig>,
    pub saves: Cell<usize>,
}

impl MemoryConfigStore {
    pub fn with_hosts(hosts: Vec<HostDescriptor>) -> Self {
        let registry = HostRegistry::from_descriptors(hosts).expect("unique hosts");
        Self {
            config: RefCell::new(EshostConfig::new(registry)),
            saves: Cell::new(0),
        }
    }

    pub fn hosts(&self) -> HostRegistry {
        self.config.borrow().hosts.clone()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Result<EshostConfig> {
        Ok(self.config.borrow().clone())
    }

    fn save(&self, config: &EshostConfig) -> Result<()> {
        *self.config.borrow_mut() = config.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn path(&self) -> Result<PathBuf> {
        Ok(PathBuf::from("/memory/.eshost-config.json"))
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn host(name: &str, host_type: &str) -> HostDescriptor {
    HostDescriptor::new(name, host_type, format!("/opt/engines/{name}"))
}

pub fn registry(hosts: &[(&str, &str)]) -> HostRegistry {
    HostRegistry::from_descriptors(hosts.iter().map(|(n, t)| host(n, t))).expect("unique hosts")
}

pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}
