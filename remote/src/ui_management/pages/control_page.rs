use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, State};
use crate::ui_management::components::{
    control_list::{self, ControlList},
    usage::{usage_to_text, HasUsageInfo, UsageInfo, UsageInfoLine},
    Component, ComponentRender,
};

const TITLE: &str = "Meeting Room Controller";
const PAGE_WIDTH: u16 = 56;
const PAGE_HEIGHT: u16 = 22;

struct Props {
    /// Display name of the controlled room
    room_name: String,
    camera_on: bool,
    meeting_accepted: bool,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            room_name: state.room_name.clone(),
            camera_on: state.device.camera_on(),
            meeting_accepted: state.device.meeting_accepted(),
        }
    }
}

/// ControlPage is the only screen: room status, the control buttons and the key bindings
pub struct ControlPage {
    /// Action sender
    pub action_tx: UnboundedSender<Action>,
    /// State Mapped ControlPage Props
    props: Props,
    // Child Components
    pub control_list: ControlList,
}

impl ControlPage {
    fn send(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }
}

impl Component for ControlPage {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        ControlPage {
            action_tx: action_tx.clone(),
            props: Props::from(state),
            control_list: ControlList::new(state, action_tx),
        }
        .move_with_state(state)
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        ControlPage {
            props: Props::from(state),
            // propagate the update to the child components
            control_list: self.control_list.move_with_state(state),
            ..self
        }
    }

    fn name(&self) -> &str {
        "Control Page"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.send(Action::Exit);
            }
            KeyCode::Char('q') => self.send(Action::Exit),
            KeyCode::Char('c') => self.send(Action::ToggleCamera),
            // the control is gone once accepted, so is its shortcut
            KeyCode::Char('a') if !self.props.meeting_accepted => {
                self.send(Action::AcceptMeeting);
            }
            _ => self.control_list.handle_key_event(key),
        }
    }
}

fn on_off_span<'a>(on: bool) -> Span<'a> {
    let (label, color) = if on {
        ("ON", Color::Green)
    } else {
        ("OFF", Color::Red)
    };

    Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

/// Rect of the given size centered in `area`, shrunk to fit when `area` is smaller
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl ComponentRender<()> for ControlPage {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, _props: ()) {
        let page_area = centered_rect(PAGE_WIDTH, PAGE_HEIGHT, frame.size());

        let [container_title, container_status, container_controls, container_usage] =
            *Layout::default()
                .direction(Direction::Vertical)
                .constraints(
                    [
                        Constraint::Length(3),
                        Constraint::Length(5),
                        Constraint::Length(4),
                        Constraint::Min(6),
                    ]
                    .as_ref(),
                )
                .split(page_area)
        else {
            panic!("The page layout should have 4 chunks")
        };

        let title = Paragraph::new(Line::from(TITLE.bold()))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, container_title);

        let status = Paragraph::new(Text::from(vec![
            Line::from(vec![
                "Room: ".into(),
                Span::from(self.props.room_name.clone()).bold(),
            ]),
            Line::from(vec!["Camera: ".into(), on_off_span(self.props.camera_on)]),
            Line::from(vec![
                "Meeting: ".into(),
                if self.props.meeting_accepted {
                    Span::from("accepted").green()
                } else {
                    Span::from("pending").italic()
                },
            ]),
        ]))
        .block(Block::default().borders(Borders::ALL).title("Room Status"));
        frame.render_widget(status, container_status);

        self.control_list.render(
            frame,
            control_list::RenderProps {
                border_color: Color::Blue,
                area: container_controls,
            },
        );

        let usage = Paragraph::new(usage_to_text(self.usage_info()))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Usage"));
        frame.render_widget(usage, container_usage);
    }
}

impl HasUsageInfo for ControlPage {
    fn usage_info(&self) -> UsageInfo {
        let mut usage = self.control_list.usage_info();

        usage.lines.push(UsageInfoLine {
            keys: vec!["q".into(), "Ctrl+C".into()],
            description: "to exit".into(),
        });

        usage
    }
}
