use crate::config::Config;
use crate::service::{Draft, Field, LinkService, Opener};
use crate::storage::Link;
use anyhow::Result;
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    List,
    Search,
    Create,
    View,
    Help,
}

pub struct App {
    pub service: LinkService,
    pub opener: Opener,
    pub export_dir: PathBuf,
    pub draft: Draft,
    pub search_query: String,
    pub selected_index: usize,
    pub mode: AppMode,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let service = if config.seed_samples {
            LinkService::with_sample_links()
        } else {
            LinkService::new()
        };

        App {
            service,
            opener: Opener::new(config.opener.clone()),
            export_dir: config.export_dir(),
            draft: Draft::new(),
            search_query: String::new(),
            selected_index: 0,
            mode: AppMode::List,
            should_quit: false,
            status_message: None,
        }
    }

    /// Links matching the current query, newest first
    pub fn visible_links(&self) -> Vec<&Link> {
        self.service.search(&self.search_query)
    }

    pub fn selected_link(&self) -> Option<&Link> {
        self.visible_links().get(self.selected_index).copied()
    }

    pub fn handle_key(&mut self, key: crossterm::event::KeyCode, modifiers: crossterm::event::KeyModifiers) -> Result<()> {
        if key == crossterm::event::KeyCode::Char('c') && modifiers.contains(crossterm::event::KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        match self.mode {
            AppMode::List => self.handle_list_key(key)?,
            AppMode::Search => self.handle_search_key(key, modifiers)?,
            AppMode::Create => self.handle_create_key(key, modifiers)?,
            AppMode::View => self.handle_view_key(key)?,
            AppMode::Help => self.handle_help_key(key)?,
        }
        Ok(())
    }

    fn handle_list_key(&mut self, key: crossterm::event::KeyCode) -> Result<()> {
        match key {
            crossterm::event::KeyCode::Esc => {
                if self.search_query.is_empty() {
                    self.should_quit = true;
                } else {
                    self.search_query.clear();
                    self.selected_index = 0;
                }
            }
            crossterm::event::KeyCode::Char('q') => {
                self.should_quit = true;
            }
            crossterm::event::KeyCode::Char('/') => {
                self.mode = AppMode::Search;
                self.status_message = None;
            }
            crossterm::event::KeyCode::Char('j') | crossterm::event::KeyCode::Down => {
                let max_index = self.visible_links().len().saturating_sub(1);
                if self.selected_index < max_index {
                    self.selected_index += 1;
                }
            }
            crossterm::event::KeyCode::Char('k') | crossterm::event::KeyCode::Up => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                }
            }
            crossterm::event::KeyCode::Char('n') | crossterm::event::KeyCode::Char('a') => {
                self.mode = AppMode::Create;
                self.status_message = None;
            }
            crossterm::event::KeyCode::Char('o') => {
                self.open_selected();
            }
            crossterm::event::KeyCode::Char('E') => {
                self.export_visible();
            }
            crossterm::event::KeyCode::Char('?') => {
                self.mode = AppMode::Help;
            }
            crossterm::event::KeyCode::Enter => {
                if self.selected_link().is_some() {
                    self.mode = AppMode::View;
                    self.status_message = None;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_search_key(&mut self, key: crossterm::event::KeyCode, modifiers: crossterm::event::KeyModifiers) -> Result<()> {
        match key {
            crossterm::event::KeyCode::Esc => {
                self.search_query.clear();
                self.selected_index = 0;
                self.mode = AppMode::List;
            }
            crossterm::event::KeyCode::Enter => {
                self.mode = AppMode::List;
            }
            // Every keystroke refilters; the list is derived from the query on render
            crossterm::event::KeyCode::Char(c) if !modifiers.contains(crossterm::event::KeyModifiers::CONTROL) => {
                self.search_query.push(c);
                self.selected_index = 0;
            }
            crossterm::event::KeyCode::Backspace => {
                self.search_query.pop();
                self.selected_index = 0;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_create_key(&mut self, key: crossterm::event::KeyCode, modifiers: crossterm::event::KeyModifiers) -> Result<()> {
        match key {
            crossterm::event::KeyCode::Esc => {
                // The draft survives until it is submitted
                self.mode = AppMode::List;
            }
            crossterm::event::KeyCode::Char('s') if modifiers.contains(crossterm::event::KeyModifiers::CONTROL) => {
                // Incomplete drafts are ignored without a message
                if let Some(link) = self.service.submit(&mut self.draft) {
                    self.select_link(link.id);
                    self.mode = AppMode::List;
                    self.status_message = Some(format!("✓ Added: {}", link.title));
                }
            }
            crossterm::event::KeyCode::Tab => {
                self.draft.focus_next();
            }
            crossterm::event::KeyCode::BackTab => {
                self.draft.focus_prev();
            }
            crossterm::event::KeyCode::Enter => {
                if self.draft.focused == Field::Description {
                    self.draft.push_char('\n');
                } else {
                    self.draft.focus_next();
                }
            }
            crossterm::event::KeyCode::Char(c) if !modifiers.contains(crossterm::event::KeyModifiers::CONTROL) => {
                self.draft.push_char(c);
            }
            crossterm::event::KeyCode::Backspace => {
                self.draft.pop_char();
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_view_key(&mut self, key: crossterm::event::KeyCode) -> Result<()> {
        match key {
            crossterm::event::KeyCode::Esc | crossterm::event::KeyCode::Char('q') => {
                self.mode = AppMode::List;
                self.status_message = None;
            }
            crossterm::event::KeyCode::Char('o') | crossterm::event::KeyCode::Enter => {
                self.open_selected();
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_help_key(&mut self, key: crossterm::event::KeyCode) -> Result<()> {
        match key {
            crossterm::event::KeyCode::Esc | crossterm::event::KeyCode::Char('q') | crossterm::event::KeyCode::Char('?') => {
                self.mode = AppMode::List;
            }
            _ => {}
        }
        Ok(())
    }

    /// Highlight the link with `id`, dropping the query if it hides that link
    fn select_link(&mut self, id: u64) {
        let position = |app: &Self| app.visible_links().iter().position(|link| link.id == id);
        if position(self).is_none() {
            self.search_query.clear();
        }
        self.selected_index = position(self).unwrap_or(0);
    }

    fn open_selected(&mut self) {
        let Some(url) = self.selected_link().map(|link| link.url.clone()) else {
            return;
        };
        self.status_message = Some(match self.opener.open(&url) {
            Ok(()) => format!("✓ Opened {}", url),
            Err(e) => {
                tracing::warn!(error = %e, "failed to open link");
                format!("✗ {}", e)
            }
        });
    }

    fn export_visible(&mut self) {
        let result = {
            let visible = self.visible_links();
            self.service.export_json(&visible, &self.export_dir)
        };
        self.status_message = Some(match result {
            Ok(path) => format!("✓ Exported to {}", path.display()),
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                format!("✗ Export failed: {}", e)
            }
        });
    }

    pub fn render(&self, frame: &mut Frame) {
        match self.mode {
            AppMode::List | AppMode::Search => self.render_list(frame),
            AppMode::Create => self.render_create(frame),
            AppMode::View => self.render_view(frame),
            AppMode::Help => self.render_help(frame),
        }
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "Коллекция ссылок",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Сохраняйте и организуйте полезные ссылки с описаниями",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(Block::default().borders(Borders::ALL).title("linkshelf"))
        .style(Style::default().fg(Color::Cyan));
        frame.render_widget(title, area);
    }

    fn render_help_bar(&self, frame: &mut Frame, area: Rect, text: &str) {
        let help = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        if let Some(ref message) = self.status_message {
            let status_color = if message.starts_with('✓') {
                Color::Green
            } else if message.starts_with('✗') {
                Color::Red
            } else {
                Color::Yellow
            };
            let status = Paragraph::new(message.as_str())
                .block(Block::default().borders(Borders::ALL).title("Status"))
                .style(Style::default().fg(status_color));
            frame.render_widget(status, area);
        }
    }

    fn render_list(&self, frame: &mut Frame) {
        let status_height = if self.status_message.is_some() { 3 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(status_height),
                Constraint::Length(3),
            ])
            .split(frame.area());

        self.render_title(frame, chunks[0]);

        // Search box
        let searching = self.mode == AppMode::Search;
        let search_line = if self.search_query.is_empty() && !searching {
            Line::from(Span::styled("🔍 Поиск по названию или описанию...", Style::default().fg(Color::DarkGray)))
        } else {
            Line::from(vec![
                Span::styled("🔍 ", Style::default()),
                Span::styled(self.search_query.as_str(), Style::default().fg(Color::Yellow)),
                Span::styled(if searching { "▏" } else { "" }, Style::default().fg(Color::Yellow)),
            ])
        };
        let search_border = if searching { Color::Yellow } else { Color::DarkGray };
        let search = Paragraph::new(search_line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(search_border))
                .title("Search"),
        );
        frame.render_widget(search, chunks[1]);

        let visible = self.visible_links();
        if let Some(empty) = self.service.empty_state(&self.search_query) {
            let text = vec![
                Line::default(),
                Line::from(Span::styled(empty.message(), Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD))),
                Line::from(Span::styled(empty.hint(), Style::default().fg(Color::DarkGray))),
            ];
            let placeholder = Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Links"))
                .wrap(Wrap { trim: true });
            frame.render_widget(placeholder, chunks[2]);
        } else {
            let items: Vec<ListItem> = visible
                .iter()
                .enumerate()
                .map(|(i, link)| {
                    let is_selected = i == self.selected_index;
                    let title_style = if is_selected {
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    };

                    let mut lines = vec![Line::from(Span::styled(link.title.as_str(), title_style))];
                    for desc_line in link.description.lines() {
                        lines.push(Line::from(Span::styled(desc_line, Style::default().fg(Color::Gray))));
                    }
                    lines.push(Line::from(vec![
                        Span::styled("↗ Перейти ", Style::default().fg(Color::Cyan)),
                        Span::styled(link.url.as_str(), Style::default().fg(Color::Blue)),
                        Span::styled(format!("  📅 {}", link.display_date()), Style::default().fg(Color::DarkGray)),
                    ]));
                    lines.push(Line::default());

                    ListItem::new(lines)
                })
                .collect();

            let mut state = ListState::default();
            state.select(Some(self.selected_index));

            let list_title = if self.search_query.is_empty() {
                format!("Links ({})", visible.len())
            } else {
                format!("Links ({} found)", visible.len())
            };
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(list_title))
                .highlight_style(Style::default().bg(Color::DarkGray))
                .highlight_symbol("▶ ");
            frame.render_stateful_widget(list, chunks[2], &mut state);
        }

        self.render_status(frame, chunks[3]);

        let help_text = if searching {
            "Type to filter | Enter: keep query | Esc: clear"
        } else {
            "j/k: navigate | n: new link | /: search | Enter: details | o: open | E: export | ?: help | Esc: clear search / quit"
        };
        self.render_help_bar(frame, chunks[4], help_text);
    }

    fn render_create(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(frame.area());

        self.render_title(frame, chunks[0]);

        for (field, area) in Field::ALL.into_iter().zip([chunks[1], chunks[2], chunks[3]]) {
            let focused = self.draft.focused == field;
            let value = self.draft.field(field);
            let mut text: Vec<Line> = if value.is_empty() && !focused {
                vec![Line::from(Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray)))]
            } else {
                value.split('\n').map(|l| Line::from(Span::styled(l, Style::default().fg(Color::White)))).collect()
            };
            if focused {
                // Cursor after the last typed character
                if let Some(last) = text.last_mut() {
                    last.spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
                }
            }

            let required = matches!(field, Field::Url | Field::Title);
            let title = if required { format!("{} *", field.label()) } else { field.label().to_string() };
            let border = if focused { Color::Yellow } else { Color::DarkGray };
            let input = Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border))
                        .title(title),
                )
                .wrap(Wrap { trim: false });
            frame.render_widget(input, area);
        }

        self.render_help_bar(frame, chunks[4], "Ctrl+S: Добавить ссылку | Tab/Shift+Tab: next/prev field | Esc: back");
    }

    fn render_view(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3), Constraint::Length(3)])
            .split(frame.area());

        self.render_title(frame, chunks[0]);

        if let Some(link) = self.selected_link() {
            let mut lines: Vec<Line> = vec![
                Line::from(vec![
                    Span::styled("📅 ", Style::default().fg(Color::Cyan)),
                    Span::styled(link.display_date(), Style::default().fg(Color::White)),
                ]),
                Line::from(vec![
                    Span::styled("🔗 ", Style::default().fg(Color::Cyan)),
                    Span::styled(link.url.as_str(), Style::default().fg(Color::Blue)),
                ]),
                Line::default(),
            ];
            for line in link.description.lines() {
                lines.push(Line::from(Span::styled(line, Style::default().fg(Color::White))));
            }

            let content = Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL).title(link.title.as_str()))
                .wrap(Wrap { trim: true });
            frame.render_widget(content, chunks[1]);
        }

        self.render_status(frame, chunks[2]);
        self.render_help_bar(frame, chunks[3], "o/Enter: open in browser | Esc: back");
    }

    fn render_help(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        self.render_title(frame, chunks[0]);

        let help_text = r#"📖 Keyboard Shortcuts

LIST MODE:
  j / ↓          Navigate down
  k / ↑          Navigate up
  n / a          Add a link
  /              Search titles and descriptions
  Enter          Show link details
  o              Open link in browser
  E              Export visible links to JSON
  ?              Show this help
  Esc            Clear search (or quit)
  q              Quit

SEARCH:
  Type           Filter as you type
  Enter          Keep query
  Esc            Clear query

ADD FORM:
  Tab            Next field
  Shift+Tab      Previous field
  Enter          Next field (newline in description)
  Ctrl+S         Add link (url and title required)
  Esc            Back, keeping the draft

Ctrl+C quits from anywhere.
"#;

        let help_para = Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL).title("Keyboard Shortcuts"))
            .wrap(Wrap { trim: false })
            .style(Style::default().fg(Color::White));
        frame.render_widget(help_para, chunks[1]);

        self.render_help_bar(frame, chunks[2], "Esc: back");
    }
}
