//! Headless month-grid projection of the calendar event store: day cells,
//! status chips, drag-and-drop routing, and the chip context popup. Pixel
//! layout stays in the rendering layer.

use chrono::{Datelike, Duration, NaiveDate};

use crate::core::day_key::DayKey;
use crate::core::event::{CalendarEvent, NoteType};
use crate::core::platform::Platform;
use crate::core::store::CalendarEventStore;
use crate::core::timefmt;

pub const GRID_WEEKS: usize = 5;
pub const GRID_CELLS: usize = GRID_WEEKS * 7;

#[derive(Debug, Clone)]
pub struct MonthGridState {
    /// First day of the displayed month.
    pub displayed_month: NaiveDate,
    /// Currently selected day (shows detail panel).
    pub selected_day: Option<NaiveDate>,
}

impl Default for MonthGridState {
    fn default() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            displayed_month: NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
                .unwrap_or(today),
            selected_day: Some(today),
        }
    }
}

impl MonthGridState {
    pub fn for_month(first: NaiveDate) -> Self {
        Self {
            displayed_month: first,
            selected_day: None,
        }
    }

    pub fn prev_month(&mut self) {
        self.displayed_month = self
            .displayed_month
            .checked_sub_months(chrono::Months::new(1))
            .unwrap_or(self.displayed_month);
        self.selected_day = None;
    }

    pub fn next_month(&mut self) {
        self.displayed_month = self
            .displayed_month
            .checked_add_months(chrono::Months::new(1))
            .unwrap_or(self.displayed_month);
        self.selected_day = None;
    }

    pub fn select_day(&mut self, date: NaiveDate) {
        if self.selected_day == Some(date) {
            self.selected_day = None;
        } else {
            self.selected_day = Some(date);
        }
    }
}

/// One rendered chip inside a day cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub platform: Platform,
    pub note_type: NoteType,
    pub label: String,
    /// Green chips are never drag sources.
    pub draggable: bool,
}

/// One of the 35 cells of the visible month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub day: DayKey,
    /// False for lead/trail days of adjacent months; those render dimmed but
    /// stay droppable.
    pub in_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub chips: Vec<Chip>,
}

/// Derive a chip's label from its note type, time, and whether the day has
/// bound content.
pub fn chip_label(event: &CalendarEvent, has_content: bool) -> String {
    match event.note_type {
        NoteType::Green => format!("posted {}", timefmt::to_12h(event.time)),
        NoteType::Yellow if has_content => format!("scheduled {}", timefmt::to_12h(event.time)),
        NoteType::Yellow => "empty".to_string(),
        NoteType::Red if has_content => "add time".to_string(),
        NoteType::Red => "no content".to_string(),
    }
}

/// Project a month into 5 weeks of 7 cells, Monday-first, including lead and
/// trail days from the adjacent months.
pub fn month_grid(
    state: &MonthGridState,
    store: &CalendarEventStore,
    today: NaiveDate,
) -> Vec<DayCell> {
    let first = state.displayed_month;
    // Monday on or before the first of the month.
    let first_index = first.weekday().num_days_from_monday() as i64;
    let grid_start = first - Duration::days(first_index);

    (0..GRID_CELLS as i64)
        .map(|i| {
            let date = grid_start + Duration::days(i);
            let day = DayKey::new(date);
            let has_content = store.content_for_day(day).is_some();
            let chips = store
                .events_for_day(day)
                .iter()
                .map(|event| Chip {
                    platform: event.platform,
                    note_type: event.note_type,
                    label: chip_label(event, has_content),
                    draggable: event.note_type.is_draggable(),
                })
                .collect();
            DayCell {
                day,
                in_month: date.month() == first.month() && date.year() == first.year(),
                is_today: date == today,
                is_selected: state.selected_day == Some(date),
                chips,
            }
        })
        .collect()
}

/// Payload carried by an in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPayload {
    /// A platform icon dragged off the rail: creates an unscheduled draft.
    NewEvent(Platform),
    /// An existing chip dragged between cells.
    MoveEvent { source: DayKey, index: usize },
}

/// Drop an in-progress drag onto a day cell. Returns whether the store
/// changed; past targets and terminal events fall through the store's own
/// rejection rules.
pub fn drop_on_cell(
    store: &mut CalendarEventStore,
    payload: DragPayload,
    target: DayKey,
    today: NaiveDate,
) -> bool {
    match payload {
        DragPayload::NewEvent(platform) => {
            store.add_event(target, CalendarEvent::draft(platform), today)
        }
        DragPayload::MoveEvent { source, index } => store.move_event(source, index, target, today),
    }
}

pub const POPUP_WIDTH: f64 = 180.0;
pub const POPUP_HEIGHT: f64 = 96.0;

/// Anchor the chip popup at the click point, clamped so the whole popup stays
/// inside the viewport.
pub fn popup_anchor(click: (f64, f64), viewport: (f64, f64)) -> (f64, f64) {
    let x = click.0.min(viewport.0 - POPUP_WIDTH).max(0.0);
    let y = click.1.min(viewport.1 - POPUP_HEIGHT).max(0.0);
    (x, y)
}

/// Actions offered by a chip's context popup. `Delete` is expected to sit
/// behind a confirmation dialog in the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipAction {
    View,
    Delete,
}

pub fn chip_actions(note_type: NoteType) -> &'static [ChipAction] {
    if note_type.is_terminal() {
        &[ChipAction::View]
    } else {
        &[ChipAction::View, ChipAction::Delete]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 14).unwrap()
    }

    fn day(d: u32) -> DayKey {
        DayKey::from_ymd(2026, 9, d).unwrap()
    }

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn september() -> MonthGridState {
        MonthGridState::for_month(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap())
    }

    #[test]
    fn grid_has_35_cells_with_lead_and_trail_days() {
        let store = CalendarEventStore::new();
        let cells = month_grid(&september(), &store, today());
        assert_eq!(cells.len(), GRID_CELLS);

        // September 1st 2026 is a Tuesday, so the grid leads with Monday
        // August 31st and trails into early October.
        assert_eq!(cells[0].day, DayKey::from_ymd(2026, 8, 31).unwrap());
        assert!(!cells[0].in_month);
        assert_eq!(cells[1].day, day(1));
        assert!(cells[1].in_month);
        assert_eq!(cells[34].day, DayKey::from_ymd(2026, 10, 4).unwrap());
        assert!(!cells[34].in_month);
    }

    #[test]
    fn today_and_selection_flags() {
        let store = CalendarEventStore::new();
        let mut state = september();
        state.select_day(NaiveDate::from_ymd_opt(2026, 9, 20).unwrap());
        let cells = month_grid(&state, &store, today());

        let today_cell = cells.iter().find(|c| c.is_today).unwrap();
        assert_eq!(today_cell.day, day(14));
        let selected: Vec<_> = cells.iter().filter(|c| c.is_selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].day, day(20));
    }

    #[test]
    fn select_day_toggles() {
        let mut state = september();
        let date = NaiveDate::from_ymd_opt(2026, 9, 20).unwrap();
        state.select_day(date);
        assert_eq!(state.selected_day, Some(date));
        state.select_day(date);
        assert_eq!(state.selected_day, None);
    }

    #[test]
    fn month_navigation() {
        let mut state = september();
        state.next_month();
        assert_eq!(state.displayed_month, NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
        state.prev_month();
        state.prev_month();
        assert_eq!(state.displayed_month, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
    }

    #[test]
    fn red_chip_without_content_reads_no_content() {
        let mut store = CalendarEventStore::new();
        store.add_event(day(15), CalendarEvent::draft(Platform::Twitter), today());
        let cells = month_grid(&september(), &store, today());
        let cell = cells.iter().find(|c| c.day == day(15)).unwrap();
        assert_eq!(cell.chips[0].label, "no content");
        assert!(cell.chips[0].draggable);
    }

    #[test]
    fn red_chip_with_content_asks_for_time() {
        let mut store = CalendarEventStore::new();
        store.add_event(day(15), CalendarEvent::draft(Platform::Twitter), today());
        store.set_content_for_day(day(15), "gm");
        let cells = month_grid(&september(), &store, today());
        let cell = cells.iter().find(|c| c.day == day(15)).unwrap();
        assert_eq!(cell.chips[0].label, "add time");
    }

    #[test]
    fn yellow_chip_labels_depend_on_content() {
        let mut store = CalendarEventStore::new();
        store.add_event(day(16), CalendarEvent::scheduled(Platform::Facebook, hm(9, 30)), today());
        let cells = month_grid(&september(), &store, today());
        let cell = cells.iter().find(|c| c.day == day(16)).unwrap();
        assert_eq!(cell.chips[0].label, "empty");

        store.set_content_for_day(day(16), "release notes");
        let cells = month_grid(&september(), &store, today());
        let cell = cells.iter().find(|c| c.day == day(16)).unwrap();
        assert_eq!(cell.chips[0].label, "scheduled 9:30 AM");
    }

    #[test]
    fn green_chip_is_labeled_posted_and_pinned() {
        let mut store = CalendarEventStore::new();
        store.add_event(day(14), CalendarEvent::posted(Platform::Instagram, hm(14, 5), None), today());
        let cells = month_grid(&september(), &store, today());
        let cell = cells.iter().find(|c| c.day == day(14)).unwrap();
        assert_eq!(cell.chips[0].label, "posted 2:05 PM");
        assert!(!cell.chips[0].draggable);
    }

    #[test]
    fn dropping_platform_icon_creates_draft() {
        let mut store = CalendarEventStore::new();
        assert!(drop_on_cell(&mut store, DragPayload::NewEvent(Platform::Pinterest), day(20), today()));
        assert_eq!(store.events_for_day(day(20))[0].note_type, NoteType::Red);
    }

    #[test]
    fn dropping_onto_yesterday_leaves_everything_in_place() {
        let mut store = CalendarEventStore::new();
        store.add_event(day(16), CalendarEvent::scheduled(Platform::Facebook, hm(9, 30)), today());
        let payload = DragPayload::MoveEvent { source: day(16), index: 0 };
        assert!(!drop_on_cell(&mut store, payload, day(13), today()));
        assert_eq!(store.events_for_day(day(16)).len(), 1);
        assert!(store.events_for_day(day(13)).is_empty());
    }

    #[test]
    fn trail_cells_accept_drops() {
        let mut store = CalendarEventStore::new();
        let trail = DayKey::from_ymd(2026, 10, 2).unwrap();
        assert!(drop_on_cell(&mut store, DragPayload::NewEvent(Platform::Twitter), trail, today()));
        let cells = month_grid(&september(), &store, today());
        let cell = cells.iter().find(|c| c.day == trail).unwrap();
        assert!(!cell.in_month);
        assert_eq!(cell.chips.len(), 1);
    }

    #[test]
    fn popup_stays_inside_viewport() {
        assert_eq!(popup_anchor((100.0, 100.0), (1280.0, 720.0)), (100.0, 100.0));
        assert_eq!(popup_anchor((1250.0, 700.0), (1280.0, 720.0)), (1100.0, 624.0));
        assert_eq!(popup_anchor((-20.0, -20.0), (1280.0, 720.0)), (0.0, 0.0));
    }

    #[test]
    fn green_chips_offer_view_only() {
        assert_eq!(chip_actions(NoteType::Green), &[ChipAction::View]);
        assert_eq!(chip_actions(NoteType::Yellow), &[ChipAction::View, ChipAction::Delete]);
        assert_eq!(chip_actions(NoteType::Red), &[ChipAction::View, ChipAction::Delete]);
    }
}
