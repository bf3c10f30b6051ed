//! One frame: input, interaction, UI and drawing.

use std::time::Instant;

use meshpick_core::ViewportRegion;
use meshpick_render::SceneView;
use meshpick_ui::{
    build_control_panel, build_status_overlay, status_text, ControlPanel, OverlayStats,
};

use super::App;
use crate::error::AppResult;

impl App {
    /// Renders a single frame.
    pub(super) fn render(&mut self) -> AppResult<()> {
        let (Some(engine), Some(egui), Some(window)) =
            (&mut self.engine, &mut self.egui, &self.window)
        else {
            return Ok(());
        };

        let fps = self.fps.tick(Instant::now());
        let viewport = ViewportRegion::docked_right(
            engine.width,
            engine.height,
            self.session.options.max_viewport_side,
        );

        // Interaction runs once, before the UI, so a layout rerun cannot
        // apply a drag twice. The pick and the draw below share the
        // transforms captured here.
        let pointer = self.pointer.take_frame(egui.pointer_over_ui());
        self.session.update(&pointer, viewport);

        let mut mode = self.session.selection().mode();
        let session = &mut self.session;
        let tab = &mut self.tab;
        let ui_frame = egui.run(window, |ctx: &egui::Context| {
            build_control_panel(
                ctx,
                ControlPanel {
                    options: &mut session.options,
                    camera: &mut session.camera,
                    mode: &mut mode,
                    tab: &mut *tab,
                },
            );
            let stats = OverlayStats {
                mouse: pointer.pos,
                viewport,
                fps,
            };
            build_status_overlay(
                ctx,
                &status_text(&session.camera, session.mesh(), mode, &stats),
            );
            session.popup().show(ctx);
        });
        self.session.set_mode(mode);

        let Some(mut frame) = engine.begin_frame()? else {
            return Ok(());
        };

        engine.draw_scene(
            &mut frame,
            &SceneView {
                transforms: self.session.transforms(),
                viewport,
                options: &self.session.options,
                mesh: self.session.mesh(),
                selection: self.session.highlighted(),
            },
        );
        egui.paint(
            &engine.device,
            &engine.queue,
            &mut frame.encoder,
            &frame.view,
            [engine.width, engine.height],
            ui_frame,
        );

        engine.finish_frame(frame);
        Ok(())
    }
}
