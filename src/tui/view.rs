//! Rendering: map App state to ratatui widget trees.
//!
//! Two screens. While booting, the revealed part of the banner is drawn
//! centered. Once ready, the shell: header bar, scrollback with the live
//! prompt at the end, and a key hint line. Widget-building functions are
//! pure; the only effect is Frame::render_widget().

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::boot::BANNER;
use crate::themes::Palette;
use crate::types::{Output, TranscriptEntry};

use super::state::App;
use super::theme;

/// First line of the scrollback, above every entry.
pub const WELCOME: &str = "Welcome to my terminal portfolio. Type 'help' to see available commands.";

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current screen to the terminal frame.
pub fn render(app: &App, frame: &mut Frame, now: Instant) {
    let palette = app.session.themes().palette();
    let area = frame.area();

    frame.render_widget(Block::new().style(theme::base(&palette)), area);

    if app.session.is_ready() {
        render_shell(app, &palette, frame, area, now);
    } else {
        render_boot(app.session.banner(), &palette, frame, area);
    }
}

// ============================================================================
// SCREEN: BOOT
// ============================================================================

fn render_boot(revealed: &str, palette: &Palette, frame: &mut Frame, area: Rect) {
    // Center on the full banner so the text does not drift while revealing
    let width = BANNER.lines().map(|l| Line::raw(l).width()).max().unwrap_or(0) as u16;
    let height = BANNER.lines().count() as u16;
    let target = centered(area, width, height);

    let lines: Vec<Line> = revealed.lines().map(Line::raw).collect();
    let banner = Paragraph::new(lines).style(theme::base(palette));
    frame.render_widget(banner, target);
}

/// A `width` x `height` rect centered in `area`, clipped to it.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

// ============================================================================
// SCREEN: SHELL
// ============================================================================

fn render_shell(app: &App, palette: &Palette, frame: &mut Frame, area: Rect, now: Instant) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // header
        Constraint::Min(0),    // scrollback + prompt
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_header(&app.user, palette), chunks[0]);
    frame.render_widget(render_help(app.session.themes().active().name.as_str()), chunks[2]);

    let busy = app.session.is_busy(now);
    let lines = scrollback_lines(app, palette, busy);
    let content = chunks[1];

    let top = scroll_top(&lines, content, app.scroll);
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((top, 0));
    frame.render_widget(paragraph, content);
}

fn render_header(user: &str, palette: &Palette) -> Paragraph<'static> {
    Paragraph::new(Line::from(vec![
        Span::styled(" ● ", theme::STYLE_ERROR),
        Span::raw("● ● "),
        Span::styled(format!(" {}@terminal_portfolio ~ zsh", user), theme::STYLE_IMPORTANT),
    ]))
    .style(theme::header(palette))
}

fn render_help(theme_name: &str) -> Paragraph<'static> {
    Paragraph::new(Span::styled(
        format!(
            "[Enter] run  [↑/↓] history  [PgUp/PgDn] scroll  [^U] clear line  [Esc] quit    theme: {}",
            theme_name
        ),
        theme::STYLE_DIM,
    ))
}

/// Welcome line, every transcript entry, then the live prompt.
fn scrollback_lines<'a>(app: &'a App, palette: &Palette, busy: bool) -> Vec<Line<'a>> {
    let mut lines = vec![Line::from(Span::styled(WELCOME, theme::STYLE_DIM)), Line::raw("")];

    for entry in app.session.transcript().entries() {
        lines.push(entry_prompt(&app.user, entry, palette));
        lines.extend(output_lines(&entry.output, palette));
        lines.push(Line::raw(""));
    }

    let mut prompt = prompt_spans(&app.user, palette);
    prompt.push(Span::styled(app.session.input().buffer(), theme::STYLE_IMPORTANT));
    if !busy {
        prompt.push(Span::raw("█"));
    }
    lines.push(Line::from(prompt));
    lines
}

fn prompt_spans<'a>(user: &str, palette: &Palette) -> Vec<Span<'a>> {
    vec![
        Span::styled("> ", theme::prompt_marker(palette)),
        Span::styled(format!("{}@profile:~$ ", user), theme::STYLE_DIM),
    ]
}

/// Echo of a submitted line: prompt, raw input, time.
fn entry_prompt<'a>(user: &str, entry: &'a TranscriptEntry, palette: &Palette) -> Line<'a> {
    let mut spans = prompt_spans(user, palette);
    spans.push(Span::styled(entry.input.as_str(), theme::STYLE_IMPORTANT));
    spans.push(Span::styled(
        format!("  {}", entry.timestamp.format("%H:%M:%S")),
        theme::STYLE_DIM,
    ));
    Line::from(spans)
}

/// Command output, indented under its prompt.
fn output_lines<'a>(output: &'a Output, palette: &Palette) -> impl Iterator<Item = Line<'a>> {
    let palette = *palette;
    output.lines.iter().map(move |line| {
        let mut spans = vec![Span::raw("  ")];
        spans.extend(
            line.segments
                .iter()
                .map(|s| Span::styled(s.text.as_str(), theme::tone(&palette, s.tone))),
        );
        Line::from(spans)
    })
}

/// First visible row so the bottom of the scrollback sits at the bottom
/// of `area`, shifted up by `scroll` rows.
///
/// Wrapped height is estimated from display width; word wrapping can
/// only add rows, never remove them.
fn scroll_top(lines: &[Line], area: Rect, scroll: u16) -> u16 {
    let width = area.width.max(1) as usize;
    let rows: usize = lines.iter().map(|l| l.width().div_ceil(width).max(1)).sum();
    let max_top = rows.saturating_sub(area.height as usize);
    max_top.saturating_sub(scroll as usize).min(u16::MAX as usize) as u16
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::config::SessionConfig;
    use crate::content::{PortfolioContent, Profile};
    use crate::platform::EnvironmentInfo;
    use crate::session::Session;
    use crate::tui::state::Action;
    use crate::tui::update::update;

    fn make_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(100, 30);
        Terminal::new(backend).unwrap()
    }

    fn app(skip_boot: bool, now: Instant) -> App {
        let config = SessionConfig {
            skip_boot,
            ..Default::default()
        };
        let content = PortfolioContent::new(Profile::default(), EnvironmentInfo::default());
        App::new(Session::new(&config, Box::new(content), now).unwrap(), "guest")
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    fn run_command(app: &mut App, line: &str, now: Instant) {
        for c in line.chars() {
            update(app, &Action::Insert(c), now);
        }
        update(app, &Action::Submit, now);
    }

    #[test]
    fn boot_screen_renders_without_panic() {
        let now = Instant::now();
        let mut terminal = make_terminal();
        let app = app(false, now);
        terminal
            .draw(|frame| render(&app, frame, now))
            .expect("render should not panic");
    }

    #[test]
    fn boot_screen_hides_shell() {
        let now = Instant::now();
        let mut terminal = make_terminal();
        let mut app = app(false, now);
        app.session.poll(now + std::time::Duration::from_millis(30));
        terminal.draw(|frame| render(&app, frame, now)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("System Booting"));
        assert!(!text.contains("Welcome"));
    }

    #[test]
    fn shell_shows_welcome_and_prompt() {
        let now = Instant::now();
        let mut terminal = make_terminal();
        let app = app(true, now);
        terminal.draw(|frame| render(&app, frame, now)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Welcome to my terminal portfolio"));
        assert!(text.contains("guest@profile:~$"));
        assert!(text.contains("guest@terminal_portfolio"));
    }

    #[test]
    fn submitted_command_is_echoed_with_output() {
        let now = Instant::now();
        let mut terminal = make_terminal();
        let mut app = app(true, now);
        run_command(&mut app, "Gui", now);
        terminal.draw(|frame| render(&app, frame, now)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Gui"));
        assert!(text.contains("GUI mode coming soon!"));
    }

    #[test]
    fn theme_change_recolors_background() {
        let now = Instant::now();
        let mut terminal = make_terminal();
        let mut app = app(true, now);
        run_command(&mut app, "themes set ubuntu", now);
        terminal.draw(|frame| render(&app, frame, now)).unwrap();

        let cell = &terminal.backend().buffer()[(0u16, 5u16)];
        assert_eq!(cell.bg, ratatui::style::Color::Rgb(0x30, 0x0a, 0x24));
        assert!(screen_text(&terminal).contains("theme: Ubuntu"));
    }

    #[test]
    fn long_transcript_keeps_prompt_visible() {
        let mut now = Instant::now();
        let mut terminal = make_terminal();
        let mut app = app(true, now);
        for _ in 0..5 {
            run_command(&mut app, "help", now);
            now += std::time::Duration::from_secs(1);
        }
        terminal.draw(|frame| render(&app, frame, now)).unwrap();
        let text = screen_text(&terminal);
        assert!(!text.contains("Welcome"), "scrolled past the top");
        assert!(text.contains("guest@profile:~$ █"));
    }

    #[test]
    fn scroll_top_pins_bottom() {
        let lines: Vec<Line> = (0..50).map(|i| Line::raw(i.to_string())).collect();
        let area = Rect::new(0, 0, 80, 20);
        assert_eq!(scroll_top(&lines, area, 0), 30);
        assert_eq!(scroll_top(&lines, area, 10), 20);
        assert_eq!(scroll_top(&lines, area, 100), 0);
    }

    #[test]
    fn scroll_top_counts_wrapped_rows() {
        let lines = vec![Line::raw("x".repeat(25))];
        assert_eq!(scroll_top(&lines, Rect::new(0, 0, 10, 1), 0), 2);
    }

    #[test]
    fn centered_clips_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered(area, 20, 4), Rect::new(10, 3, 20, 4));
        assert_eq!(centered(area, 100, 100), area);
    }
}
