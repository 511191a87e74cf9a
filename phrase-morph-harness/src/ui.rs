use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

use phrase_morph::{MorphText, Phase};

use crate::app::App;

const ACCENT: Color = Color::Rgb(94, 234, 212);

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(f.area());

    header(f, app, chunks[0]);
    headline(f, app, chunks[1]);
    status(f, app, chunks[2]);
}

fn header(f: &mut Frame, app: &App, area: Rect) {
    let bundle = app.session.bundle();
    let hints = &bundle.hints;
    let toggle = if app.is_paused() { &hints.resume } else { &hints.pause };

    let line = Line::from(vec![
        Span::styled(bundle.title.as_str(), Style::new().fg(ACCENT).bold()),
        Span::raw("  "),
        Span::raw(format!(
            "[{}]  [{}]  [{}]  {}",
            hints.switch,
            toggle,
            hints.quit,
            app.session.path()
        )),
    ]);

    f.render_widget(
        Paragraph::new(line).style(Style::new().fg(Color::DarkGray)),
        area,
    );
}

fn headline(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::bordered().title(format!(" {} ", app.session.bundle().language));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(inner);

    f.render_widget(
        Paragraph::new(app.session.bundle().tagline.as_str())
            .alignment(Alignment::Center)
            .style(Style::new().fg(Color::Gray)),
        rows[1],
    );

    if let Some(frame) = app.text.frame() {
        f.render_widget(
            MorphText::new(&frame)
                .style(Style::new().fg(ACCENT).bold())
                .blur_scale(app.config.blur_scale),
            rows[3],
        );
    }
}

fn status(f: &mut Frame, app: &App, area: Rect) {
    let labels = &app.session.bundle().status;

    let text = match (app.text.frame(), app.text.state()) {
        (Some(frame), Some(state)) => {
            let label = match frame.phase {
                Phase::Cooldown => &labels.cooldown,
                Phase::Morph => &labels.morph,
            };

            format!(
                "{label}  {}/{}  {:>3.0}%",
                state.current_index + 1,
                app.phrases().len(),
                frame.fraction * 100.0
            )
        }
        _ => labels.paused.clone(),
    };

    f.render_widget(
        Paragraph::new(text).style(Style::new().fg(Color::DarkGray)),
        area,
    );
}
