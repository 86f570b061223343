//! Desktop control panel for pwm-pattern-composer
//!
//! Hosts a controller with two simulated transports: a console where lines
//! are typed by hand and a remote panel with one button per command. Every
//! response is mirrored to both logs, and the eight channel duties are drawn
//! as bars.

use std::collections::VecDeque;
use std::time::Instant as StdInstant;

use eframe::egui::{self};
use pwm_pattern_composer::{
    CHANNEL_COUNT, ControlLoop, Controller, ControllerConfig, DutySink, Instant, Line, MAX_DUTY,
    PollResult, Transport,
};

/// Width of each channel bar in pixels
const BAR_WIDTH: f32 = 48.0;

/// Gap between channel bars
const BAR_GAP: f32 = 12.0;

/// Height of a bar at full duty
const BAR_HEIGHT: f32 = 220.0;

/// Number of lines kept in each transport log
const LOG_LINES: usize = 200;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_title("PWM Pattern Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "pwm-pattern-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

/// Sink that keeps the last duty per channel for drawing
#[derive(Debug, Default)]
struct PreviewSink {
    duty: [u8; CHANNEL_COUNT],
    writes: u64,
}

impl DutySink for PreviewSink {
    fn set_duty(&mut self, channel: usize, duty: u8) {
        self.duty[channel] = duty;
        self.writes += 1;
    }
}

/// In-memory transport fed from the UI
struct PanelTransport {
    name: &'static str,
    pending: VecDeque<String>,
    log: VecDeque<String>,
}

impl PanelTransport {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            pending: VecDeque::new(),
            log: VecDeque::new(),
        }
    }

    fn send(&mut self, text: &str) {
        self.push_log(format!("> {text}"));
        self.pending.push_back(text.to_owned());
    }

    fn push_log(&mut self, entry: String) {
        if self.log.len() == LOG_LINES {
            self.log.pop_front();
        }
        self.log.push_back(entry);
    }
}

impl Transport for PanelTransport {
    fn name(&self) -> &str {
        self.name
    }

    fn poll_line(&mut self) -> Option<Line> {
        let text = self.pending.pop_front()?;
        let mut line = Line::new();
        for c in text.chars() {
            if line.push(c).is_err() {
                break;
            }
        }
        Some(line)
    }

    fn write_line(&mut self, line: &str) {
        self.push_log(line.to_owned());
    }
}

struct PreviewApp {
    controller: Controller<PreviewSink>,
    control: ControlLoop,
    console: PanelTransport,
    remote: PanelTransport,
    /// Text typed into the console
    input: String,
    /// Result of the latest loop pass
    last_poll: Option<PollResult>,
    /// Synthetic time in milliseconds
    t_ms: u64,
    /// Wall-clock reference for delta time
    last_frame: StdInstant,
    /// Whether time is running
    playing: bool,
    /// Time scale multiplier (1.0 = realtime)
    time_scale: f32,
    /// Value of the remote intensity slider
    remote_intensity: u8,
    /// Value of the remote speed slider
    remote_speed: u16,
}

impl PreviewApp {
    fn new() -> Self {
        let config = ControllerConfig::default();
        Self {
            controller: Controller::new(PreviewSink::default(), &config),
            control: ControlLoop::new(),
            console: PanelTransport::new("console"),
            remote: PanelTransport::new("remote"),
            input: String::new(),
            last_poll: None,
            t_ms: 0,
            last_frame: StdInstant::now(),
            playing: true,
            time_scale: 1.0,
            remote_intensity: config.intensity,
            remote_speed: config.wave_speed_ms,
        }
    }

    /// Update synthetic time based on wall clock and time scale
    fn update_time(&mut self) {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.playing {
            let delta_ms_f64 = delta.as_secs_f64() * 1000.0 * f64::from(self.time_scale);
            let delta_ms_f64 = if delta_ms_f64.is_finite() {
                #[allow(clippy::cast_precision_loss)]
                delta_ms_f64.clamp(0.0, u64::MAX as f64)
            } else {
                0.0
            };
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let delta_ms = delta_ms_f64 as u64;
            self.t_ms = self.t_ms.saturating_add(delta_ms);
        }
    }

    /// Run one pass of the control loop over both transports
    fn poll(&mut self) {
        let now = Instant::from_millis(self.t_ms);
        let mut transports: [&mut dyn Transport; 2] = [&mut self.console, &mut self.remote];
        let result = self.control.poll(&mut self.controller, &mut transports, now);
        self.last_poll = Some(result);
    }

    fn submit_console_line(&mut self) {
        let text = std::mem::take(&mut self.input);
        self.console.send(&text);
    }

    fn remote_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for command in ["MODE:STOP", "MODE:CONSTANT", "MODE:WAVE", "STATUS"] {
                if ui.button(command).clicked() {
                    self.remote.send(command);
                }
            }
        });

        ui.add_space(4.0);

        ui.horizontal(|ui| {
            ui.label("Intensity:");
            ui.add(egui::Slider::new(&mut self.remote_intensity, 0..=MAX_DUTY));
            if ui.button("Send").clicked() {
                self.remote
                    .send(&format!("INTENSITY:{}", self.remote_intensity));
            }
        });

        ui.horizontal(|ui| {
            ui.label("Speed (ms):");
            ui.add(egui::Slider::new(&mut self.remote_speed, 50..=500));
            if ui.button("Send").clicked() {
                self.remote.send(&format!("SPEED:{}", self.remote_speed));
            }
        });
    }

    fn channel_bars(&self, ui: &mut egui::Ui) {
        #[allow(clippy::cast_precision_loss)]
        let width = CHANNEL_COUNT as f32 * (BAR_WIDTH + BAR_GAP);
        let (response, painter) =
            ui.allocate_painter(egui::vec2(width, BAR_HEIGHT + 20.0), egui::Sense::hover());
        let origin = response.rect.min;
        let state = self.controller.state();

        #[allow(clippy::cast_precision_loss)]
        for (channel, duty) in self.controller.sink().duty.iter().enumerate() {
            let x = origin.x + channel as f32 * (BAR_WIDTH + BAR_GAP);
            let height = f32::from(*duty) / f32::from(MAX_DUTY) * BAR_HEIGHT;

            let frame = egui::Rect::from_min_size(
                egui::pos2(x, origin.y),
                egui::vec2(BAR_WIDTH, BAR_HEIGHT),
            );
            painter.rect_filled(frame, 3.0, egui::Color32::from_gray(40));

            let bar = egui::Rect::from_min_size(
                egui::pos2(x, origin.y + BAR_HEIGHT - height),
                egui::vec2(BAR_WIDTH, height),
            );
            let color = if channel == state.wave_position() {
                egui::Color32::from_rgb(255, 170, 60)
            } else {
                egui::Color32::from_rgb(80, 170, 255)
            };
            painter.rect_filled(bar, 3.0, color);

            painter.text(
                egui::pos2(x + BAR_WIDTH / 2.0, origin.y + BAR_HEIGHT + 10.0),
                egui::Align2::CENTER_CENTER,
                format!("{channel}: {duty}"),
                egui::FontId::monospace(12.0),
                egui::Color32::LIGHT_GRAY,
            );
        }
    }
}

fn transport_log(ui: &mut egui::Ui, transport: &PanelTransport) {
    ui.vertical(|ui| {
        ui.label(transport.name);
        egui::ScrollArea::vertical()
            .id_salt(transport.name)
            .max_height(180.0)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for entry in &transport.log {
                    ui.monospace(entry);
                }
            });
    });
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_time();
        self.poll();

        // Request continuous repaint for animation
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                // <PlaybackControls>
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        if ui
                            .button(if self.playing { "⏸ Pause" } else { "▶ Play" })
                            .clicked()
                        {
                            self.playing = !self.playing;
                        }
                        let secs = self.t_ms / 1000;
                        let ms = self.t_ms % 1000;
                        ui.label(format!("Time: {secs}.{ms:03}s"));
                    });

                    ui.horizontal(|ui| {
                        ui.label("Time scale:");
                        ui.add(egui::Slider::new(&mut self.time_scale, 0.1..=5.0).logarithmic(true));
                    });
                });
                // </PlaybackControls>
                ui.add_space(16.0);
                // <RemoteControls>
                ui.vertical(|ui| self.remote_controls(ui));
                // </RemoteControls>
            });

            ui.add_space(12.0);

            ui.horizontal(|ui| {
                ui.label("Console:");
                let response = ui.text_edit_singleline(&mut self.input);
                let entered =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                let clicked = ui.button("Send").clicked();
                if entered || clicked {
                    self.submit_console_line();
                    response.request_focus();
                }
            });

            ui.add_space(12.0);

            let state = self.controller.state();
            ui.label(format!(
                "Mode: {}  Intensity: {}  Speed: {} ms  Position: {}  Writes: {}",
                state.mode(),
                state.intensity(),
                state.wave_speed_ms(),
                state.wave_position(),
                self.controller.sink().writes,
            ));
            if let Some(next) = self.last_poll.and_then(|poll| poll.next_wave_update) {
                ui.label(format!("Next wave step at {} ms", next.as_millis()));
            }

            ui.add_space(8.0);
            self.channel_bars(ui);
            ui.add_space(12.0);

            ui.horizontal(|ui| {
                transport_log(ui, &self.console);
                ui.add_space(16.0);
                transport_log(ui, &self.remote);
            });
        });
    }
}
