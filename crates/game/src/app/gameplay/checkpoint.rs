use engine::{Color, Rect, Surface, SurfaceError, TextAlign, TextStyle, Vec2};

use super::save::SaveSlot;

const PANEL_WIDTH: f32 = 450.0;
const PANEL_HEIGHT: f32 = 280.0;
const BUTTON_WIDTH: f32 = 380.0;
const BUTTON_HEIGHT: f32 = 40.0;
const FIRST_BUTTON_OFFSET: f32 = 70.0;
const BUTTON_PITCH: f32 = 50.0;
const CANCEL_GAP: f32 = 10.0;
const CONFIRM_WIDTH: f32 = 320.0;
const CONFIRM_HEIGHT: f32 = 160.0;
const CHOICE_WIDTH: f32 = 100.0;
const CHOICE_HEIGHT: f32 = 40.0;

const BACKDROP: Color = Color::rgba(0, 0, 0, 230);
const PANEL_FILL: Color = Color::rgb(0x1A, 0x1A, 0x1A);
const SLOT_FILL: Color = Color::rgb(0x33, 0x33, 0x33);
const CANCEL_FILL: Color = Color::rgb(0x44, 0x44, 0x44);
const SUBTLE_TEXT: Color = Color::rgb(0xCC, 0xCC, 0xCC);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuState {
    SelectingSlot,
    Confirming(SaveSlot),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuAction {
    None,
    Save(SaveSlot),
    Close,
}

/// Hit regions of the menu for a given canvas size.
#[derive(Debug, Clone, PartialEq)]
struct MenuLayout {
    panel: Rect,
    slots: Vec<(SaveSlot, Rect)>,
    cancel: Rect,
    confirm_box: Rect,
    yes: Rect,
    no: Rect,
}

impl MenuLayout {
    fn for_canvas(width: f32, height: f32) -> Self {
        let panel = Rect::new(
            (width - PANEL_WIDTH) / 2.0,
            (height - PANEL_HEIGHT) / 2.0,
            PANEL_WIDTH,
            PANEL_HEIGHT,
        );
        let button_x = panel.x + (PANEL_WIDTH - BUTTON_WIDTH) / 2.0;
        let first_y = panel.y + FIRST_BUTTON_OFFSET;
        let slots: Vec<(SaveSlot, Rect)> = SaveSlot::all()
            .enumerate()
            .map(|(index, slot)| {
                let y = first_y + index as f32 * BUTTON_PITCH;
                (slot, Rect::new(button_x, y, BUTTON_WIDTH, BUTTON_HEIGHT))
            })
            .collect();
        let cancel_y = first_y + slots.len() as f32 * BUTTON_PITCH + CANCEL_GAP;
        let cancel = Rect::new(button_x, cancel_y, BUTTON_WIDTH, BUTTON_HEIGHT);

        let confirm_box = Rect::new(
            (width - CONFIRM_WIDTH) / 2.0,
            (height - CONFIRM_HEIGHT) / 2.0,
            CONFIRM_WIDTH,
            CONFIRM_HEIGHT,
        );
        let choice_y = confirm_box.bottom() - CHOICE_HEIGHT - 20.0;
        let center_x = width / 2.0;
        let yes = Rect::new(
            center_x - CHOICE_WIDTH - 20.0,
            choice_y,
            CHOICE_WIDTH,
            CHOICE_HEIGHT,
        );
        let no = Rect::new(center_x + 20.0, choice_y, CHOICE_WIDTH, CHOICE_HEIGHT);

        Self {
            panel,
            slots,
            cancel,
            confirm_box,
            yes,
            no,
        }
    }
}

/// Three-slot save menu opened at the checkpoint, with a YES/NO confirmation.
#[derive(Debug, Clone)]
pub(crate) struct CheckpointMenu {
    state: MenuState,
    slot_labels: Vec<String>,
    layout: MenuLayout,
}

impl CheckpointMenu {
    pub(crate) fn new(canvas_width: f32, canvas_height: f32) -> Self {
        Self {
            state: MenuState::SelectingSlot,
            slot_labels: Vec::new(),
            layout: MenuLayout::for_canvas(canvas_width, canvas_height),
        }
    }

    pub(crate) fn open(&mut self, slot_labels: Vec<String>) {
        self.state = MenuState::SelectingSlot;
        self.slot_labels = slot_labels;
    }

    pub(crate) fn pending_slot(&self) -> Option<SaveSlot> {
        match self.state {
            MenuState::SelectingSlot => None,
            MenuState::Confirming(slot) => Some(slot),
        }
    }

    pub(crate) fn handle_click(&mut self, point: Vec2) -> MenuAction {
        match self.state {
            MenuState::SelectingSlot => {
                if let Some((slot, _)) = self
                    .layout
                    .slots
                    .iter()
                    .find(|(_, rect)| rect.contains(point))
                {
                    self.state = MenuState::Confirming(*slot);
                    return MenuAction::None;
                }
                if self.layout.cancel.contains(point) {
                    return MenuAction::Close;
                }
                MenuAction::None
            }
            MenuState::Confirming(slot) => {
                if self.layout.yes.contains(point) {
                    self.state = MenuState::SelectingSlot;
                    return MenuAction::Save(slot);
                }
                if self.layout.no.contains(point) {
                    self.state = MenuState::SelectingSlot;
                }
                MenuAction::None
            }
        }
    }

    pub(crate) fn render(&self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        let (width, height) = surface.size();
        let full = Rect::new(0.0, 0.0, width as f32, height as f32);
        let layout = &self.layout;
        surface.fill_rect(full, BACKDROP)?;
        draw_bordered_panel(surface, layout.panel, PANEL_FILL)?;

        let title = TextStyle::new(Color::WHITE, 24.0).aligned(TextAlign::Center);
        let center_x = layout.panel.x + PANEL_WIDTH / 2.0;
        surface.fill_text("SAVE", Vec2::new(center_x, layout.panel.y + 40.0), title)?;

        let label_style = TextStyle::new(Color::WHITE, 16.0);
        for (index, (slot, rect)) in layout.slots.iter().enumerate() {
            surface.fill_rect(*rect, SLOT_FILL)?;
            surface.stroke_rect(*rect, 2.0, Color::WHITE)?;
            let label = self
                .slot_labels
                .get(index)
                .cloned()
                .unwrap_or_else(|| format!("Slot {slot}"));
            surface.fill_text(
                &label,
                Vec2::new(rect.x + 15.0, rect.y + 25.0),
                label_style,
            )?;
        }

        surface.fill_rect(layout.cancel, CANCEL_FILL)?;
        surface.stroke_rect(layout.cancel, 2.0, Color::WHITE)?;
        surface.fill_text(
            "Cancel",
            Vec2::new(center_x, layout.cancel.y + 25.0),
            label_style.aligned(TextAlign::Center),
        )?;

        if let Some(slot) = self.pending_slot() {
            self.render_confirmation(surface, slot)?;
        }
        Ok(())
    }

    fn render_confirmation(
        &self,
        surface: &mut dyn Surface,
        slot: SaveSlot,
    ) -> Result<(), SurfaceError> {
        let layout = &self.layout;
        let center_x = layout.confirm_box.x + CONFIRM_WIDTH / 2.0;
        draw_bordered_panel(surface, layout.confirm_box, Color::BLACK)?;
        surface.fill_text(
            "Are You Sure?",
            Vec2::new(center_x, layout.confirm_box.y + 40.0),
            TextStyle::new(Color::WHITE, 18.0).aligned(TextAlign::Center),
        )?;
        surface.fill_text(
            &format!("Save to slot {slot}?"),
            Vec2::new(center_x, layout.confirm_box.y + 70.0),
            TextStyle::new(SUBTLE_TEXT, 14.0).aligned(TextAlign::Center),
        )?;
        let choice_style = TextStyle::new(Color::WHITE, 16.0).aligned(TextAlign::Center);
        for (rect, text) in [(layout.yes, "YES"), (layout.no, "NO")] {
            surface.stroke_rect(rect, 2.0, Color::WHITE)?;
            surface.fill_text(
                text,
                Vec2::new(rect.x + rect.width / 2.0, rect.y + 26.0),
                choice_style,
            )?;
        }
        Ok(())
    }
}

fn draw_bordered_panel(
    surface: &mut dyn Surface,
    rect: Rect,
    fill: Color,
) -> Result<(), SurfaceError> {
    surface.fill_rect(rect.inflate(6.0), Color::WHITE)?;
    surface.fill_rect(rect.inflate(3.0), Color::BLACK)?;
    surface.fill_rect(rect, fill)
}
