use eframe::egui::{self, Color32, Pos2, Ui};
use pledgemap_core::color::Color;
use pledgemap_core::human::human_amount;
use pledgemap_core::interaction::TooltipPayload;
use pledgemap_core::search::match_leaves;
use pledgemap_core::{Rect, Treemap};

use crate::state::AppState;

pub fn draw(app: &mut AppState, ctx: &egui::Context) {
    egui::TopBottomPanel::top("top").show(ctx, |ui| {
        top_bar(ui, app);
    });

    egui::SidePanel::right("legend").resizable(false).default_width(220.0).show(ctx, |ui| {
        ui.heading("Categories");
        ui.separator();
        if let Some(map) = &app.map {
            legend(ui, map);
        }
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Kickstarter Pledges");
        ui.label("A tree map of Kickstarter projects categorized by goal amount.");
        ui.separator();
        if let Some(err) = &app.error {
            ui.colored_label(Color32::RED, err);
            return;
        }
        match &app.map {
            Some(map) => {
                egui::ScrollArea::both().show(ui, |ui| treemap(ui, map, &app.search));
            }
            None => {
                ui.label("Open a dataset to start");
            }
        }
    });
}

fn top_bar(ui: &mut Ui, app: &mut AppState) {
    ui.horizontal(|ui| {
        if ui.button("Open Dataset").clicked() {
            if let Some(path) = rfd::FileDialog::new().add_filter("JSON", &["json"]).pick_file() {
                app.open(path);
            }
        }
        if ui.add_enabled(app.path.is_some(), egui::Button::new("Reload")).clicked() {
            app.reload();
        }
        ui.separator();
        ui.label("Search:");
        ui.text_edit_singleline(&mut app.search);
        if let Some(map) = &app.map {
            ui.separator();
            ui.label(format!("{} projects, {}", map.leaves.len(), human_amount(map.total)));
        }
    });
}

fn treemap(ui: &mut Ui, map: &Treemap, search: &str) {
    let size = egui::vec2(map.width as f32, map.height as f32);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let origin = response.rect.min;
    let matches = match_leaves(&map.leaves, search);

    for (leaf, &hit) in map.leaves.iter().zip(&matches) {
        let rect = to_screen(origin, leaf.rect);
        let mut fill = to_color32(map.color_of(leaf));
        if !hit {
            fill = fill.gamma_multiply(0.25);
        }
        painter.rect_filled(rect, 0.0, fill);
        if rect.width() > 30.0 && rect.height() > 18.0 {
            painter.with_clip_rect(rect).text(
                rect.min + egui::vec2(5.0, 4.0),
                egui::Align2::LEFT_TOP,
                leaf.name(),
                egui::FontId::proportional(10.0),
                Color32::WHITE,
            );
        }
    }

    if let Some(pos) = response.hover_pos() {
        let local = pos - origin;
        if let Some(tip) = map.tooltip_at(local.x as f64, local.y as f64) {
            tooltip(ui.ctx(), origin, &tip);
        }
    }
}

fn tooltip(ctx: &egui::Context, origin: Pos2, tip: &TooltipPayload) {
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Tooltip,
        egui::Id::new("tile_tooltip"),
    ));
    let anchor = origin + egui::vec2(tip.anchor_x as f32, tip.anchor_y as f32);
    let galley = painter.layout_no_wrap(
        format!("{}\n{}", tip.text, tip.category),
        egui::FontId::proportional(12.0),
        Color32::WHITE,
    );
    let frame = egui::Rect::from_min_size(anchor, galley.size()).expand(6.0);
    painter.rect_filled(frame, 4.0, Color32::from_black_alpha(220));
    painter.galley(anchor, galley, Color32::WHITE);
}

fn legend(ui: &mut Ui, map: &Treemap) {
    for (category, color) in map.legend_entries() {
        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(20.0, 20.0), egui::Sense::hover());
            ui.painter().rect_filled(rect, 0.0, to_color32(color));
            ui.label(category);
        });
    }
}

fn to_screen(origin: Pos2, r: Rect) -> egui::Rect {
    egui::Rect::from_min_max(
        origin + egui::vec2(r.x0 as f32, r.y0 as f32),
        origin + egui::vec2(r.x1 as f32, r.y1 as f32),
    )
}

fn to_color32(c: Color) -> Color32 {
    Color32::from_rgb(c.r, c.g, c.b)
}
