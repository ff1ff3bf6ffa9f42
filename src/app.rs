use crate::category::{CategoryFilter, DocumentType, Uncategorized};
use crate::data::Directory;
use crate::filter_state::{FilterState, FilterStateManager};
use crate::history::{History, Location};
use crate::render::{build_page, render_text, PageData, Rendered};
use crate::route::{resolve, Page, NAV_PAGES};
use crate::text::{match_positions, truncate_chars};
use eframe::egui;
use std::cell::RefCell;
use std::rc::Rc;

const MAX_ROW_CHARS: usize = 160;

/// What the current location shows, detached from the directory borrow.
#[derive(Debug, Clone)]
pub struct PageView {
    pub page: Page,
    pub rendered: Rendered,
    /// Link target per rendered line, where the line is a link.
    pub links: Vec<Option<String>>,
    pub state: FilterState<DocumentType>,
}

impl PageView {
    pub fn link(&self, row: usize) -> Option<&str> {
        self.links.get(row).and_then(|l| l.as_deref())
    }
}

/// Link targets lined up with the lines `render_text` produces for the same
/// `limit`: listings are clipped the same way, and the trailing "... (N more)"
/// line has no link.
fn row_links(data: &PageData<'_>, limit: usize) -> Vec<Option<String>> {
    let limit = limit.max(1);
    match data {
        PageData::ElectedOfficials { elected, chambers } => elected
            .iter()
            .map(|_| None)
            .chain(
                chambers
                    .iter()
                    .map(|c| Some(Page::Chamber(c.slug.clone()).path())),
            )
            .collect(),
        PageData::Departments(view) => view
            .iter()
            .take(limit)
            .map(|d| Some(Page::Department(d.slug.clone()).path()))
            .collect(),
        PageData::Barangays(view) => view
            .iter()
            .take(limit)
            .map(|b| Some(Page::Barangay(b.slug.clone()).path()))
            .collect(),
        PageData::Legislation { view, .. } => {
            view.iter().take(limit).map(|d| Some(d.path())).collect()
        }
        PageData::Transparency => vec![Some(Page::Financial.path())],
        _ => Vec::new(),
    }
}

pub struct DirectoryApp {
    directory: Directory,
    history: History,
    plain_filter: FilterStateManager<Uncategorized>,
    doc_filter: FilterStateManager<DocumentType>,
    address: String,
    search_input: String,
    limit: usize,
    status_line: String,
    notice: String,
    synced: Rc<RefCell<Option<FilterState<DocumentType>>>>,
    focus_search_requested: bool,
    focus_address_requested: bool,
}

impl DirectoryApp {
    pub fn new(directory: Directory, start: Location, limit: usize) -> Self {
        let mut history = History::new(start);
        let doc_filter = FilterStateManager::<DocumentType>::new();
        let synced = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&synced);
        doc_filter.watch(&mut history, move |state| {
            *sink.borrow_mut() = Some(state);
        });

        let initial = doc_filter.get_state(history.current());
        let mut app = Self {
            directory,
            address: history.current().to_string(),
            history,
            plain_filter: FilterStateManager::new(),
            doc_filter,
            search_input: initial.search_text,
            limit: limit.max(1),
            status_line: String::new(),
            notice: String::new(),
            synced,
            focus_search_requested: true,
            focus_address_requested: false,
        };
        app.refresh_status_line();
        app
    }

    pub fn current_href(&self) -> String {
        self.history.current().to_string()
    }

    pub fn current_view(&self) -> PageView {
        let location = self.history.current();
        let (page, data) = build_page(&self.directory, location);
        PageView {
            rendered: render_text(&page, &data, self.limit),
            links: row_links(&data, self.limit),
            state: self.doc_filter.get_state(location),
            page,
        }
    }

    /// Opens `href` as a new history entry. Same-location navigation is ignored.
    pub fn navigate(&mut self, href: &str) {
        let next = Location::parse(href);
        if next == *self.history.current() {
            return;
        }
        self.notice.clear();
        self.history.push(next);
        self.sync_from_history();
    }

    pub fn go_back(&mut self) {
        self.notice = if self.history.back() {
            String::new()
        } else {
            "Nothing to go back to".to_string()
        };
        self.sync_from_history();
    }

    pub fn go_forward(&mut self) {
        self.notice = if self.history.forward() {
            String::new()
        } else {
            "Nothing to go forward to".to_string()
        };
        self.sync_from_history();
    }

    fn current_page(&self) -> Page {
        resolve(&self.history.current().path)
    }

    pub fn apply_search(&mut self, text: &str) {
        if self.current_page().typed() {
            self.doc_filter.set_search_text(&mut self.history, text);
        } else {
            self.plain_filter.set_search_text(&mut self.history, text);
        }
        self.sync_from_history();
    }

    pub fn apply_category(&mut self, category: CategoryFilter<DocumentType>) {
        self.doc_filter
            .set_category_filter(&mut self.history, category);
        self.sync_from_history();
    }

    pub fn clear_filters(&mut self) {
        if self.current_page().typed() {
            self.doc_filter.clear(&mut self.history);
        } else {
            self.plain_filter.clear(&mut self.history);
        }
        self.notice = "Cleared filters".to_string();
        self.sync_from_history();
        self.focus_search_requested = true;
    }

    /// Pulls the search box and address bar back in line with the location.
    fn sync_from_history(&mut self) {
        if let Some(state) = self.synced.borrow_mut().take() {
            self.search_input = state.search_text;
        }
        self.address = self.current_href();
        self.refresh_status_line();
    }

    fn refresh_status_line(&mut self) {
        let view = self.current_view();
        self.status_line = if self.notice.is_empty() {
            format!("{} | {}", view.rendered.summary, self.current_href())
        } else {
            format!("{} | {}", view.rendered.summary, self.notice)
        };
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let alt = egui::Modifiers {
            alt: true,
            ..Default::default()
        };
        if ctx.input_mut(|i| i.consume_key(alt, egui::Key::ArrowLeft)) {
            self.go_back();
        }
        if ctx.input_mut(|i| i.consume_key(alt, egui::Key::ArrowRight)) {
            self.go_forward();
        }

        let ctrl = egui::Modifiers {
            ctrl: true,
            ..Default::default()
        };
        if ctx.input_mut(|i| i.consume_key(ctrl, egui::Key::L)) {
            self.focus_address_requested = true;
        }
        if ctx.input_mut(|i| i.consume_key(ctrl, egui::Key::F)) {
            self.focus_search_requested = true;
        }
        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Escape)) {
            self.clear_filters();
        }
    }

    fn highlighted_row(ui: &egui::Ui, text: &str, query: &str) -> egui::text::LayoutJob {
        let text = truncate_chars(text, MAX_ROW_CHARS);
        let positions = match_positions(&text, query);
        let normal = ui.visuals().text_color();
        let highlight = egui::Color32::from_rgb(255, 140, 0);

        let mut job = egui::text::LayoutJob::default();
        for (idx, ch) in text.chars().enumerate() {
            let color = if positions.contains(&idx) {
                highlight
            } else {
                normal
            };
            job.append(
                &ch.to_string(),
                0.0,
                egui::TextFormat {
                    color,
                    ..Default::default()
                },
            );
        }
        job
    }
}

impl eframe::App for DirectoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        let view = self.current_view();
        let mut navigate_to: Option<String> = None;
        let mut picked_category: Option<CategoryFilter<DocumentType>> = None;
        let mut back = false;
        let mut forward = false;

        egui::TopBottomPanel::top("address").show(ctx, |ui| {
            ui.horizontal(|ui| {
                back = ui
                    .add_enabled(self.history.can_go_back(), egui::Button::new("◀"))
                    .clicked();
                forward = ui
                    .add_enabled(self.history.can_go_forward(), egui::Button::new("▶"))
                    .clicked();
                let address_id = ui.make_persistent_id("address-input");
                let output = egui::TextEdit::singleline(&mut self.address)
                    .id(address_id)
                    .desired_width(f32::INFINITY)
                    .show(ui);
                if self.focus_address_requested {
                    output.response.request_focus();
                    self.focus_address_requested = false;
                }
                if output.response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    navigate_to = Some(self.address.trim().to_string());
                }
            });
        });

        egui::TopBottomPanel::bottom("status")
            .resizable(false)
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.add(egui::Label::new(&self.status_line).truncate());
            });

        egui::SidePanel::left("nav")
            .resizable(false)
            .default_width(190.0)
            .show(ctx, |ui| {
                ui.heading("Browse");
                let current_path = view.page.path();
                for (label, path) in NAV_PAGES {
                    if ui
                        .selectable_label(current_path.starts_with(path), *label)
                        .clicked()
                    {
                        navigate_to = Some(path.to_string());
                    }
                }
                if view.page.typed() {
                    ui.separator();
                    ui.label("Document Type");
                    for choice in CategoryFilter::<DocumentType>::choices() {
                        if ui
                            .selectable_label(view.state.category == choice, choice.label())
                            .clicked()
                        {
                            picked_category = Some(choice);
                        }
                    }
                }
            });

        let mut search_changed = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(&view.rendered.title);
            ui.label(egui::RichText::new(&view.rendered.summary).weak());
            if view.page.searchable() {
                let search_id = ui.make_persistent_id("search-input");
                let output = egui::TextEdit::singleline(&mut self.search_input)
                    .id(search_id)
                    .desired_width(f32::INFINITY)
                    .hint_text("Search...")
                    .show(ui);
                if self.focus_search_requested {
                    output.response.request_focus();
                    self.focus_search_requested = false;
                }
                search_changed = output.response.changed();
            }
            ui.separator();

            let query = if view.page.searchable() {
                view.state.search_text.as_str()
            } else {
                ""
            };
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for (row, line) in view.rendered.lines.iter().enumerate() {
                        let job = Self::highlighted_row(ui, line, query);
                        match view.link(row) {
                            Some(href) => {
                                let response = ui
                                    .add(egui::Label::new(job).sense(egui::Sense::click()))
                                    .on_hover_cursor(egui::CursorIcon::PointingHand);
                                if response.clicked() {
                                    navigate_to = Some(href.to_string());
                                }
                            }
                            None => {
                                ui.label(job);
                            }
                        }
                    }
                });
        });

        if back {
            self.go_back();
        }
        if forward {
            self.go_forward();
        }
        if search_changed {
            let text = self.search_input.clone();
            self.apply_search(&text);
        }
        if let Some(category) = picked_category {
            self.apply_category(category);
        }
        if let Some(href) = navigate_to {
            self.navigate(&href);
        }
    }
}
