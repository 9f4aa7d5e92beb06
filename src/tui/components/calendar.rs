//! # Reading Calendar Overlay
//!
//! Centered overlay showing the coming week and the child's pending reading
//! goals. Entering and leaving animates over 300ms; during the transition the
//! overlay renders dimmed, matching the transient `Opening`/`Closing` phases
//! of the coordinator.

use chrono::{Datelike, Duration, NaiveDate};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::backend::ReadingSchedule;
use crate::core::overlay::CalendarPhase;
use crate::tui::component::Component;
use crate::tui::components::centered_rect;

/// The seven days shown, starting today.
pub fn week_days(today: NaiveDate) -> Vec<NaiveDate> {
    (0..7).map(|offset| today + Duration::days(offset)).collect()
}

/// Pending goals falling on `day`.
pub fn goals_for_day(schedules: &[ReadingSchedule], day: NaiveDate) -> Vec<&ReadingSchedule> {
    schedules.iter().filter(|s| s.date == day).collect()
}

/// Transient render wrapper for the calendar overlay.
pub struct CalendarOverlay<'a> {
    pub phase: CalendarPhase,
    pub schedules: &'a [ReadingSchedule],
    pub today: NaiveDate,
}

impl<'a> CalendarOverlay<'a> {
    fn week_strip(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, day) in week_days(self.today).into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let has_goal = !goals_for_day(self.schedules, day).is_empty();
            let mut style = if day == self.today {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            if has_goal {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            spans.push(Span::styled(
                format!("{} {:>2}", day.format("%a"), day.day()),
                style,
            ));
        }
        Line::from(spans)
    }

    fn goal_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for day in week_days(self.today) {
            for goal in goals_for_day(self.schedules, day) {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{}  ", day.format("%b %e")),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(goal.book_title.clone(), Style::default().fg(Color::Cyan)),
                    Span::styled(
                        format!("  {} pages", goal.pages),
                        Style::default().fg(Color::Gray),
                    ),
                ]));
            }
        }
        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "Nothing scheduled this week.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines
    }
}

impl<'a> Component for CalendarOverlay<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(64, 60, area);
        frame.render_widget(Clear, overlay);

        let mut border_style = Style::default().fg(Color::DarkGray);
        if matches!(self.phase, CalendarPhase::Opening | CalendarPhase::Closing) {
            border_style = border_style.add_modifier(Modifier::DIM);
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Reading Calendar ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Ctrl+K Close ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [strip_area, goals_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);

        frame.render_widget(
            Paragraph::new(self.week_strip()).alignment(Alignment::Center),
            strip_area,
        );
        frame.render_widget(Paragraph::new(self.goal_lines()), goals_area);
    }
}
