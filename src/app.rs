use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::domain::{is_address, AppMeta, NetworkConfig, NetworkRegistry, PulseError, Session};
use crate::infrastructure::runtime::{Operation, RuntimeCommand, RuntimeEvent};
use crate::ui::report;

/// The five user-facing controls, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Connect,
    Toggle,
    Pulse,
    AddressInput,
    CheckBalance,
}

impl Control {
    pub const ALL: [Control; 5] = [
        Control::Connect,
        Control::Toggle,
        Control::Pulse,
        Control::AddressInput,
        Control::CheckBalance,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Control::Connect => "Connect Wallet",
            Control::Toggle => "Toggle Network (Base ↔ Base Sepolia)",
            Control::Pulse => "Pulse Snapshot",
            Control::AddressInput => "Address",
            Control::CheckBalance => "Check Address Balance",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Control::Connect => 'c',
            Control::Toggle => 't',
            Control::Pulse => 'p',
            Control::AddressInput => 'a',
            Control::CheckBalance => 'b',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

/// All application state; owned by the run loop
pub struct App {
    pub meta: AppMeta,
    pub networks: NetworkRegistry,
    pub session: Option<Session>,
    /// Pulse and Check Balance are usable only while this is set
    pub unlocked: bool,
    /// Bumped on every network toggle; results from older epochs are dropped
    pub epoch: u64,
    pub in_flight: Option<Operation>,
    pub output: Vec<String>,
    pub scroll: u16,
    pub address_input: String,
    pub input_mode: InputMode,
    pub status: Option<StatusMessage>,
    pub pending: Vec<RuntimeCommand>,
    pub control_areas: Vec<(Control, Rect)>,
    pub output_area: Rect,
    pub should_quit: bool,
}

impl App {
    pub fn new(meta: AppMeta, networks: NetworkRegistry) -> Self {
        let output = report::ready(networks.active());
        Self {
            meta,
            networks,
            session: None,
            unlocked: false,
            epoch: 0,
            in_flight: None,
            output,
            scroll: 0,
            address_input: String::new(),
            input_mode: InputMode::Normal,
            status: None,
            pending: Vec::new(),
            control_areas: Vec::new(),
            output_area: Rect::default(),
            should_quit: false,
        }
    }

    pub fn active(&self) -> &NetworkConfig {
        self.networks.active()
    }

    pub fn is_enabled(&self, control: Control) -> bool {
        match control {
            Control::Pulse | Control::CheckBalance => self.unlocked,
            Control::Connect | Control::Toggle | Control::AddressInput => true,
        }
    }

    /// Trigger a control; disabled controls only leave a hint
    pub fn activate(&mut self, control: Control) {
        if !self.is_enabled(control) {
            self.set_status(
                format!("{} is disabled until a wallet is connected", control.title()),
                StatusLevel::Warn,
            );
            return;
        }
        match control {
            Control::Connect => self.connect(),
            Control::Toggle => self.toggle_network(),
            Control::Pulse => self.pulse(),
            Control::AddressInput => self.input_mode = InputMode::Address,
            Control::CheckBalance => self.check_balance(),
        }
    }

    pub fn connect(&mut self) {
        let network = self.active().clone();
        self.begin(Operation::Connect);
        self.pending.push(RuntimeCommand::Connect {
            epoch: self.epoch,
            network,
        });
    }

    /// Switch target network and force a reconnect
    pub fn toggle_network(&mut self) {
        let network = self.networks.toggle().clone();
        self.epoch += 1;
        self.unlocked = false;
        self.in_flight = None;
        tracing::info!(
            kind = ?network.kind,
            label = %network.label,
            chain_id = network.chain_id,
            "network toggled"
        );
        self.replace_output(report::toggled(&network));
    }

    pub fn pulse(&mut self) {
        if self.session.is_none() {
            self.fail(Operation::Pulse, &PulseError::NotConnected);
            return;
        }
        let network = self.active().clone();
        self.begin(Operation::Pulse);
        self.pending.push(RuntimeCommand::Pulse {
            epoch: self.epoch,
            network,
        });
    }

    pub fn check_balance(&mut self) {
        let candidate = match self.balance_candidate() {
            Ok(candidate) => candidate,
            Err(err) => {
                self.fail(Operation::Balance, &err);
                return;
            }
        };
        let network = self.active().clone();
        self.begin(Operation::Balance);
        self.pending.push(RuntimeCommand::CheckBalance {
            epoch: self.epoch,
            network,
            address: candidate,
        });
    }

    /// Typed address, else the session address; validated before any request
    pub fn balance_candidate(&self) -> Result<String, PulseError> {
        let typed = self.address_input.trim();
        let candidate = if typed.is_empty() {
            self.session
                .as_ref()
                .map(|s| s.address.clone())
                .unwrap_or_default()
        } else {
            typed.to_string()
        };
        if candidate.is_empty() {
            return Err(PulseError::MissingAddress);
        }
        if !is_address(&candidate) {
            return Err(PulseError::InvalidAddress(candidate));
        }
        Ok(candidate)
    }

    pub fn take_pending(&mut self) -> Vec<RuntimeCommand> {
        std::mem::take(&mut self.pending)
    }

    pub fn apply_event(&mut self, event: RuntimeEvent) {
        if let Some(epoch) = event.epoch() {
            if epoch != self.epoch {
                tracing::debug!(epoch, current = self.epoch, "dropping stale result");
                return;
            }
        }

        match event {
            RuntimeEvent::Connected {
                network,
                session,
                basics,
                ..
            } => {
                let lines = report::connected(&network, &session, &basics);
                self.set_status(
                    format!("Wallet connected via {}", session.handle.endpoint_name()),
                    StatusLevel::Info,
                );
                self.session = Some(session);
                self.unlocked = true;
                self.finish(lines);
            }
            RuntimeEvent::PulseReady {
                network, snapshot, ..
            } => self.finish(report::pulse(&network, &snapshot)),
            RuntimeEvent::BalanceReady {
                network,
                address,
                balance,
                ..
            } => self.finish(report::balance(&network, &address, balance)),
            RuntimeEvent::Failed { op, message, .. } => {
                self.in_flight = None;
                self.replace_output(report::error(op, &message));
            }
            RuntimeEvent::Error { message } => {
                self.in_flight = None;
                self.set_status(message, StatusLevel::Error);
            }
        }
    }

    fn begin(&mut self, op: Operation) {
        self.in_flight = Some(op);
        self.replace_output(report::progress(op));
    }

    fn finish(&mut self, lines: Vec<String>) {
        self.in_flight = None;
        self.replace_output(lines);
    }

    fn fail(&mut self, op: Operation, err: &PulseError) {
        tracing::warn!(op = op.label(), error = %err, "operation rejected");
        self.in_flight = None;
        self.replace_output(report::error(op, &err.to_string()));
    }

    fn replace_output(&mut self, lines: Vec<String>) {
        self.output = lines;
        self.scroll = 0;
    }

    // Output scrolling

    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll = self.scroll.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: u16) {
        let max = self.output.len().saturating_sub(1) as u16;
        self.scroll = self.scroll.saturating_add(amount).min(max);
    }

    // Address input

    pub fn input_char(&mut self, c: char) {
        if !c.is_control() {
            self.address_input.push(c);
        }
    }

    pub fn input_backspace(&mut self) {
        self.address_input.pop();
    }

    pub fn input_clear(&mut self) {
        self.address_input.clear();
    }

    pub fn leave_input(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    // Status line

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > Duration::from_secs(3) {
                self.status = None;
            }
        }
    }

    pub fn control_at(&self, col: u16, row: u16) -> Option<Control> {
        self.control_areas
            .iter()
            .find(|(_, rect)| {
                col >= rect.x
                    && col < rect.x.saturating_add(rect.width)
                    && row >= rect.y
                    && row < rect.y.saturating_add(rect.height)
            })
            .map(|(control, _)| *control)
    }
}
