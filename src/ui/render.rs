use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, List, ListItem, ListState, Paragraph, Wrap};

use crate::app::{App, PendingDelete, StatusKind};
use crate::screen::{
    GenreForm, QuizScreen, Screen, StartScreen, WordDetailScreen, WordField, WordForm,
    WordListScreen,
};
use crate::ui::layout::{AppLayout, centered_rect, pack_hint_lines};
use crate::ui::theme::ThemeColors;

const CONFIDENT_MARK: &str = "●";
const NOT_CONFIDENT_MARK: &str = "○";

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let layout = AppLayout::new(area);
    render_header(frame, app, layout.header);

    match &app.screen {
        Screen::Start(screen) => render_start(frame, colors, screen, layout.main),
        Screen::AddGenre(form) | Screen::EditGenre(form) => {
            render_genre_form(frame, colors, form, layout.main)
        }
        Screen::WordList(screen) => render_word_list(frame, colors, screen, layout.main),
        Screen::AddWord(form) | Screen::EditWord(form) => {
            render_word_form(frame, colors, form, layout.main)
        }
        Screen::WordDetail(screen) => render_word_detail(frame, colors, screen, layout.main),
        Screen::WordCheck(screen) => render_word_check(frame, colors, screen, layout.main),
        Screen::WordCheckAnswer(screen) => {
            render_word_answer(frame, colors, screen, layout.main)
        }
    }

    render_footer(frame, app, layout.footer);

    if let Some(pending) = &app.confirm {
        render_confirm(frame, colors, pending, area);
    }
}

fn screen_title(screen: &Screen) -> String {
    match screen {
        Screen::Start(_) => "Genres".to_string(),
        Screen::AddGenre(_) => "New genre".to_string(),
        Screen::EditGenre(form) => match &form.genre {
            Some(genre) => format!("Edit genre: {}", genre.name),
            None => "Edit genre".to_string(),
        },
        Screen::WordList(s) => s.genre.name.clone(),
        Screen::AddWord(form) => format!("{} / new word", form.genre.name),
        Screen::EditWord(form) => format!("{} / edit word", form.genre.name),
        Screen::WordDetail(s) => format!("{} / {}", s.genre.name, s.word.word),
        Screen::WordCheck(s) | Screen::WordCheckAnswer(s) => format!("{} / check", s.genre.name),
    }
}

fn key_hints(app: &App) -> &'static [&'static str] {
    if app.confirm.is_some() {
        return &["[y] Delete", "[n/Esc] Keep"];
    }
    match &app.screen {
        Screen::Start(_) => &[
            "[Enter] Open",
            "[a] Add genre",
            "[e] Edit genre",
            "[j/k] Move",
            "[q] Quit",
        ],
        Screen::AddGenre(_) => &["[Enter] Save", "[Esc] Cancel"],
        Screen::EditGenre(_) => &["[Enter] Save", "[Ctrl+D] Delete", "[Esc] Cancel"],
        Screen::WordList(_) => &[
            "[Enter] Details",
            "[Space] Toggle confident",
            "[1/2/3] All/Confident/Not",
            "[a] Add",
            "[e] Edit",
            "[c] Check",
            "[Esc] Back",
        ],
        Screen::AddWord(_) => &["[Tab] Switch field", "[Ctrl+S] Save", "[Esc] Cancel"],
        Screen::EditWord(_) => &[
            "[Tab] Switch field",
            "[Ctrl+S] Save",
            "[Ctrl+D] Delete",
            "[Esc] Cancel",
        ],
        Screen::WordDetail(_) => &[
            "[h/l] Prev/Next",
            "[j/k] Scroll",
            "[e] Edit",
            "[Esc] Back",
        ],
        Screen::WordCheck(s) if s.quiz.is_complete() => &["[Esc] Back to list"],
        Screen::WordCheck(_) => &["[Enter] Show answer", "[Esc] Back to list"],
        Screen::WordCheckAnswer(_) => &[
            "[Space] Toggle confident",
            "[Enter] Next",
            "[Esc] Back to list",
        ],
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " My単語帳 ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", screen_title(&app.screen)),
            Style::default().fg(colors.text_dim()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let mut lines = Vec::new();

    match &app.status {
        Some(status) => {
            let color = match status.kind {
                StatusKind::Info => colors.success(),
                StatusKind::Error => colors.error(),
            };
            lines.push(Line::from(Span::styled(
                format!("  {}", status.text),
                Style::default().fg(color),
            )));
        }
        None => lines.push(Line::from("")),
    }

    for hint in pack_hint_lines(key_hints(app), area.width as usize) {
        lines.push(Line::from(Span::styled(
            hint,
            Style::default().fg(colors.text_dim()),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn confidence_mark(confident: bool) -> &'static str {
    if confident {
        CONFIDENT_MARK
    } else {
        NOT_CONFIDENT_MARK
    }
}

fn list_block<'a>(colors: &ThemeColors, title: String) -> Block<'a> {
    Block::bordered()
        .title(title)
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()))
}

fn render_empty_hint(frame: &mut Frame, colors: &ThemeColors, text: &str, area: Rect) {
    let msg = Paragraph::new(Line::from(Span::styled(
        format!("  {text}"),
        Style::default().fg(colors.text_dim()),
    )));
    frame.render_widget(msg, area);
}

fn render_start(frame: &mut Frame, colors: &ThemeColors, screen: &StartScreen, area: Rect) {
    let block = list_block(colors, " Genres ".to_string());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if screen.genres.is_empty() {
        render_empty_hint(frame, colors, "No genres yet. Press [a] to add one.", inner);
        return;
    }

    let items: Vec<ListItem> = screen
        .genres
        .iter()
        .map(|g| ListItem::new(Line::from(format!(" {}", g.name))))
        .collect();
    let list = List::new(items)
        .style(Style::default().fg(colors.fg()))
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg())
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(screen.selection.index());
    frame.render_stateful_widget(list, inner, &mut state);
}

fn render_word_list(frame: &mut Frame, colors: &ThemeColors, screen: &WordListScreen, area: Rect) {
    let title = format!(
        " {} | {} | {}/{} confident ",
        screen.genre.name,
        screen.filter.as_str(),
        screen.confident_count(),
        screen.words.len()
    );
    let block = list_block(colors, title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if screen.words.is_empty() {
        render_empty_hint(frame, colors, "No words here. Press [a] to add one.", inner);
        return;
    }

    let items: Vec<ListItem> = screen
        .words
        .iter()
        .map(|w| {
            let mark_color = if w.confidence {
                colors.success()
            } else {
                colors.text_dim()
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {} ", confidence_mark(w.confidence)),
                    Style::default().fg(mark_color),
                ),
                Span::raw(w.word.clone()),
            ]))
        })
        .collect();
    let list = List::new(items)
        .style(Style::default().fg(colors.fg()))
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg())
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(screen.selection.index());
    frame.render_stateful_widget(list, inner, &mut state);
}

fn cursor_style(colors: &ThemeColors) -> Style {
    Style::default().fg(colors.cursor_fg()).bg(colors.cursor_bg())
}

fn field_block<'a>(colors: &ThemeColors, title: &'a str, focused: bool) -> Block<'a> {
    let border = if focused {
        colors.border_focused()
    } else {
        colors.border()
    };
    Block::bordered()
        .title(title)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(colors.bg()))
}

fn render_genre_form(frame: &mut Frame, colors: &ThemeColors, form: &GenreForm, area: Rect) {
    let field_area = centered_rect(60, 3, area);
    let block = field_block(colors, " Genre name ", true);
    let lines = form
        .name
        .styled_lines(Style::default().fg(colors.fg()), Some(cursor_style(colors)));
    frame.render_widget(Paragraph::new(lines).block(block), field_area);
}

fn render_word_form(frame: &mut Frame, colors: &ThemeColors, form: &WordForm, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let text = Style::default().fg(colors.fg());
    let word_focused = form.focus == WordField::Word;

    let word_lines = form
        .word_input
        .styled_lines(text, word_focused.then(|| cursor_style(colors)));
    frame.render_widget(
        Paragraph::new(word_lines).block(field_block(colors, " Word ", word_focused)),
        layout[0],
    );

    let details_lines = form
        .details_input
        .styled_lines(text, (!word_focused).then(|| cursor_style(colors)));
    frame.render_widget(
        Paragraph::new(details_lines)
            .wrap(Wrap { trim: false })
            .block(field_block(colors, " Details ", !word_focused)),
        layout[1],
    );
}

fn word_heading<'a>(colors: &ThemeColors, word: &'a str, confident: bool) -> Line<'a> {
    let mark_color = if confident {
        colors.success()
    } else {
        colors.text_dim()
    };
    Line::from(vec![
        Span::styled(
            format!("{} ", confidence_mark(confident)),
            Style::default().fg(mark_color),
        ),
        Span::styled(
            word,
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

fn render_word_detail(
    frame: &mut Frame,
    colors: &ThemeColors,
    screen: &WordDetailScreen,
    area: Rect,
) {
    let block = list_block(colors, format!(" {} ", screen.genre.name));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    let heading = word_heading(colors, &screen.word.word, screen.word.confidence);
    frame.render_widget(Paragraph::new(heading), layout[0]);

    let details = Paragraph::new(screen.word.details.as_str())
        .style(Style::default().fg(colors.fg()))
        .wrap(Wrap { trim: false })
        .scroll((screen.scroll, 0));
    frame.render_widget(details, layout[1]);
}

fn render_word_check(frame: &mut Frame, colors: &ThemeColors, screen: &QuizScreen, area: Rect) {
    let quiz = &screen.quiz;
    let block = list_block(colors, format!(" {} ", screen.genre.name));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match quiz.current() {
        None if quiz.is_empty() => vec![Line::from(Span::styled(
            "No words to check.",
            Style::default().fg(colors.text_dim()),
        ))],
        None => vec![
            Line::from(Span::styled(
                "Finished!",
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("{} words checked", quiz.len()),
                Style::default().fg(colors.fg()),
            )),
        ],
        Some(word) => vec![
            Line::from(Span::styled(
                format!("{} / {}", quiz.position(), quiz.len()),
                Style::default().fg(colors.text_dim()),
            )),
            Line::from(""),
            Line::from(Span::styled(
                word.word.as_str(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
        ],
    };

    let body = centered_rect(inner.width, lines.len() as u16, inner);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);
}

fn render_word_answer(frame: &mut Frame, colors: &ThemeColors, screen: &QuizScreen, area: Rect) {
    let quiz = &screen.quiz;
    let block = list_block(
        colors,
        format!(" {} | {} / {} ", screen.genre.name, quiz.position(), quiz.len()),
    );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(word) = quiz.current() else {
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(word_heading(colors, &word.word, word.confidence)),
        layout[0],
    );
    let details = Paragraph::new(word.details.as_str())
        .style(Style::default().fg(colors.fg()))
        .wrap(Wrap { trim: false });
    frame.render_widget(details, layout[1]);
}

fn render_confirm(frame: &mut Frame, colors: &ThemeColors, pending: &PendingDelete, area: Rect) {
    let text = format!("{} (y/n)", pending.prompt());
    let message = Line::from(Span::styled(
        format!("  {text}  "),
        Style::default().fg(colors.fg()),
    ));
    // Display width, plus two columns of border. centered_rect clamps to the area.
    let width = u16::try_from(message.width())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .max(30);
    let dialog_area = centered_rect(width, 5, area);

    frame.render_widget(Clear, dialog_area);
    let dialog = Paragraph::new(vec![Line::from(""), message])
        .style(Style::default().bg(colors.bg()))
        .block(
            Block::bordered()
                .title(" Confirm ")
                .border_style(Style::default().fg(colors.warning()))
                .style(Style::default().bg(colors.bg())),
        );
    frame.render_widget(dialog, dialog_area);
}
