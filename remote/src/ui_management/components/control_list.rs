use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    prelude::{Backend, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, DeviceState, State};

use super::{
    usage::{HasUsageInfo, UsageInfo, UsageInfoLine},
    Component, ComponentRender,
};

/// A button of the control page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    AcceptMeeting,
    ToggleCamera,
}

impl Control {
    pub fn label(&self) -> &'static str {
        match self {
            Control::AcceptMeeting => "Accept Meeting",
            Control::ToggleCamera => "Toggle Camera",
        }
    }

    pub fn action(&self) -> Action {
        match self {
            Control::AcceptMeeting => Action::AcceptMeeting,
            Control::ToggleCamera => Action::ToggleCamera,
        }
    }
}

/// Controls that can be pressed in the given device state, top to bottom.
/// Accept Meeting disappears for good once the meeting is accepted.
pub fn visible_controls(device: &DeviceState) -> Vec<Control> {
    let mut controls = Vec::with_capacity(2);
    if !device.meeting_accepted() {
        controls.push(Control::AcceptMeeting);
    }
    controls.push(Control::ToggleCamera);

    controls
}

struct Props {
    controls: Vec<Control>,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Self {
            controls: visible_controls(&state.device),
        }
    }
}

pub struct ControlList {
    /// Sending actions to the state store
    action_tx: UnboundedSender<Action>,
    /// State Mapped ControlList Props
    props: Props,
    // Internal Component State
    /// Hovered control
    list_state: ListState,
}

impl ControlList {
    fn next(&mut self) {
        let len = self.props.controls.len();
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    fn previous(&mut self) {
        let len = self.props.controls.len();
        let i = match self.list_state.selected() {
            Some(0) | None => len.saturating_sub(1),
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    pub fn controls(&self) -> &[Control] {
        &self.props.controls
    }

    pub fn hovered(&self) -> Option<Control> {
        self.list_state
            .selected()
            .and_then(|idx| self.props.controls.get(idx).copied())
    }
}

impl Component for ControlList {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            action_tx,
            props: Props::from(state),
            list_state,
        }
    }

    fn move_with_state(mut self, state: &State) -> Self
    where
        Self: Sized,
    {
        let hovered = self.hovered();
        let props = Props::from(state);

        // keep hovering the same control, the list shrinks once the meeting is accepted
        let idx = hovered
            .and_then(|control| props.controls.iter().position(|c| *c == control))
            .unwrap_or(0);
        self.list_state.select(Some(idx));

        Self { props, ..self }
    }

    fn name(&self) -> &str {
        "Controls"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Up => self.previous(),
            KeyCode::Down => self.next(),
            KeyCode::Enter => {
                if let Some(control) = self.hovered() {
                    let _ = self.action_tx.send(control.action());
                }
            }
            _ => (),
        }
    }
}

pub struct RenderProps {
    pub border_color: Color,
    pub area: Rect,
}

impl ComponentRender<RenderProps> for ControlList {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, props: RenderProps) {
        let items: Vec<ListItem> = self
            .controls()
            .iter()
            .map(|control| {
                ListItem::new(Line::from(Span::raw(format!("[ {} ]", control.label()))))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::new().fg(props.border_color))
                    .title(self.name()),
            )
            .highlight_style(
                Style::default()
                    // yellow that would work for both dark / light modes
                    .bg(Color::Rgb(255, 223, 102))
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = self.list_state.clone();
        frame.render_stateful_widget(list, props.area, &mut list_state);
    }
}

impl HasUsageInfo for ControlList {
    fn usage_info(&self) -> UsageInfo {
        let mut lines = vec![
            UsageInfoLine {
                keys: vec!["↑".into(), "↓".into()],
                description: "to hover a control".into(),
            },
            UsageInfoLine {
                keys: vec!["Enter".into()],
                description: format!(
                    "to press {}",
                    self.hovered().map(|c| c.label()).unwrap_or("the control")
                ),
            },
        ];

        if self.controls().contains(&Control::AcceptMeeting) {
            lines.push(UsageInfoLine {
                keys: vec!["a".into()],
                description: "to accept the meeting".into(),
            });
        }
        lines.push(UsageInfoLine {
            keys: vec!["c".into()],
            description: "to toggle the camera".into(),
        });

        UsageInfo {
            description: None,
            lines,
        }
    }
}
