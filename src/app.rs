use eframe::egui;

use x100v_film::FilmError;
use x100v_film::feed::{FeedConfig, FrameLoop};
use x100v_film::film::{Parameter, PresetStore};
use x100v_film::image_io;
use x100v_film::source::{StillImageSource, TestPatternSource};

pub struct FilmSimApp {
    store: PresetStore,
    feed: FrameLoop,
    preview_texture: Option<egui::TextureHandle>,
    capture_texture: Option<egui::TextureHandle>,
    show_capture: bool,
    status: Option<String>,
}

impl FilmSimApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            store: PresetStore::default(),
            feed: FrameLoop::new(FeedConfig::default()),
            preview_texture: None,
            capture_texture: None,
            show_capture: false,
            status: None,
        };
        app.use_test_pattern();
        app
    }

    fn report(&mut self, err: FilmError) {
        log::warn!("{err}");
        self.status = Some(err.to_string());
    }

    fn open_image(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "tiff", "tif", "bmp", "webp"])
            .pick_file()
        {
            let config = self.feed.config();
            match StillImageSource::open(&path, config.frame_width, config.frame_height) {
                Ok(source) => {
                    self.feed.start(Box::new(source));
                    self.status = None;
                }
                Err(e) => self.report(e),
            }
        }
    }

    fn use_test_pattern(&mut self) {
        let config = self.feed.config();
        match TestPatternSource::new(config.frame_width, config.frame_height) {
            Ok(source) => {
                self.feed.start(Box::new(source));
                self.status = None;
            }
            Err(e) => self.report(e),
        }
    }

    fn capture(&mut self, ctx: &egui::Context) {
        let frame = match self.feed.capture() {
            Ok(frame) => frame,
            Err(e) => return self.report(e),
        };
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [frame.width(), frame.height()],
            frame.as_raw(),
        );
        self.capture_texture =
            Some(ctx.load_texture("capture", color_image, egui::TextureOptions::LINEAR));
        self.show_capture = true;
        self.status = Some("Frame captured".to_string());
    }

    fn ui_capture_window(&mut self, ctx: &egui::Context) {
        let Some(tex) = &self.capture_texture else {
            return;
        };
        let [w, h] = tex.size();
        let scale = (320.0 / w as f32).min(1.0);
        let size = egui::vec2(w as f32 * scale, h as f32 * scale);
        let id = tex.id();

        let mut open = self.show_capture;
        let mut save = false;
        egui::Window::new("Captured")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.image(egui::load::SizedTexture::new(id, size));
                if ui.button("Save JPEG").clicked() {
                    save = true;
                }
            });
        self.show_capture = open;
        if save {
            self.save_capture();
        }
    }

    fn save_capture(&mut self) {
        let export = match self.feed.export_capture() {
            Ok(export) => export,
            Err(e) => return self.report(e),
        };
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JPEG", &["jpg", "jpeg"])
            .set_file_name(&export.filename)
            .save_file()
        {
            match image_io::save_bytes(&export.bytes, &path) {
                Ok(()) => self.status = Some(format!("Saved {}", path.display())),
                Err(e) => self.report(e),
            }
        }
    }

    fn process_frame(&mut self, ctx: &egui::Context) {
        match self.feed.tick(&self.store, &mut rand::rng()) {
            Ok(true) => {}
            Ok(false) => return,
            Err(e) => return self.report(e),
        }

        let frame = self.feed.frame();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [frame.width(), frame.height()],
            frame.as_raw(),
        );
        match &mut self.preview_texture {
            Some(tex) => tex.set(color_image, egui::TextureOptions::LINEAR),
            None => {
                self.preview_texture =
                    Some(ctx.load_texture("preview", color_image, egui::TextureOptions::LINEAR));
            }
        }
    }
}

impl eframe::App for FilmSimApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // One kernel invocation per repaint; settings changed below apply next frame.
        self.process_frame(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open Image").clicked() {
                    self.open_image();
                }
                if ui.button("Test Pattern").clicked() {
                    self.use_test_pattern();
                }
                if ui.button("Stop").clicked() {
                    self.feed.stop();
                }
                ui.separator();

                ui.label("Film:");
                let active = self.store.active_preset();
                let current_name = if self.store.is_modified() {
                    format!("{}*", active.name())
                } else {
                    active.name().to_string()
                };
                egui::ComboBox::from_id_salt("film_preset")
                    .selected_text(current_name)
                    .show_ui(ui, |ui| {
                        for &preset in self.store.list_presets() {
                            if ui
                                .selectable_label(preset == active, preset.name())
                                .clicked()
                            {
                                self.store.select(preset);
                            }
                        }
                    });
                if ui.button("Reset").clicked() {
                    self.store.select(active);
                }

                ui.separator();
                if ui.button("Capture").clicked() {
                    self.capture(ctx);
                }
                if ui.button("Save").clicked() {
                    self.save_capture();
                }

                ui.separator();
                if let Some(name) = self.feed.source_name() {
                    let frame = self.feed.frame();
                    ui.label(format!(
                        "{name} | {}x{} | {:.0}ms",
                        frame.width(),
                        frame.height(),
                        self.feed.last_frame_ms()
                    ));
                }
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(self.status.as_deref().unwrap_or("Ready"));
        });

        egui::SidePanel::left("controls")
            .default_width(300.0)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui_tone(ui, &mut self.store);
                    ui_effects(ui, &mut self.store);
                    ui_color_matrix(ui, &mut self.store);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(tex) = &self.preview_texture {
                let available = ui.available_size();
                let [w, h] = tex.size();
                let scale = f32::min(available.x / w as f32, available.y / h as f32).min(1.0);
                let display_size = egui::vec2(w as f32 * scale, h as f32 * scale);
                ui.image(egui::load::SizedTexture::new(tex.id(), display_size));
            } else {
                ui.centered_and_justified(|ui| {
                    ui.label("Open an image or start the test pattern");
                });
            }
        });

        self.ui_capture_window(ctx);

        if self.feed.is_running() {
            ctx.request_repaint();
        }
    }
}

// --- UI Section Builders ---

fn param_slider(ui: &mut egui::Ui, store: &mut PresetStore, param: Parameter) {
    let mut value = store.active_settings().get(param);
    if ui
        .add(egui::Slider::new(&mut value, param.range()).text(param.label()))
        .changed()
    {
        store.set(param, value);
    }
}

fn ui_tone(ui: &mut egui::Ui, store: &mut PresetStore) {
    egui::CollapsingHeader::new("Tone")
        .default_open(true)
        .show(ui, |ui| {
            param_slider(ui, store, Parameter::Saturation);
            param_slider(ui, store, Parameter::ShadowCurve);
            param_slider(ui, store, Parameter::HighlightCurve);
            param_slider(ui, store, Parameter::Warmth);
        });
}

fn ui_effects(ui: &mut egui::Ui, store: &mut PresetStore) {
    egui::CollapsingHeader::new("Grain & Halation")
        .default_open(true)
        .show(ui, |ui| {
            param_slider(ui, store, Parameter::Grain);
            param_slider(ui, store, Parameter::Halation);
        });
}

fn ui_color_matrix(ui: &mut egui::Ui, store: &mut PresetStore) {
    egui::CollapsingHeader::new("Color Matrix")
        .default_open(false)
        .show(ui, |ui| {
            for param in Parameter::ALL {
                if matches!(param, Parameter::Matrix { .. }) {
                    param_slider(ui, store, param);
                }
            }
        });
}
