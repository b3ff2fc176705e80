use anyhow::Context;
use egui::{Color32, Label, RichText};
use log::Level;
use time::OffsetDateTime;

/// Installs the logger and hands back the stream of records for the log
/// window. Only records from this crate are kept.
pub fn init_logger() -> anyhow::Result<flume::Receiver<Record>> {
    let (sender, receiver) = flume::unbounded();
    log::set_boxed_logger(Box::new(Logger::new(sender))).context("a logger is already set")?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(receiver)
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DisplayOptions {
    pub elapsed: bool,
    pub level: bool,
    pub target: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            elapsed: true,
            level: true,
            target: false,
        }
    }
}

#[derive(Debug)]
pub struct Record {
    pub timestamp: OffsetDateTime,
    pub start: OffsetDateTime,
    pub target: Box<str>,
    pub level: Level,
    pub data: Box<str>,
}

impl Record {
    const fn level_label(&self) -> &'static str {
        match self.level {
            Level::Error => "error",
            Level::Warn => "warn ",
            Level::Info => "info ",
            Level::Debug => "debug",
            Level::Trace => "trace",
        }
    }

    pub const fn level_color(level: Level) -> Color32 {
        match level {
            Level::Error => Color32::RED,
            Level::Warn => Color32::YELLOW,
            Level::Info => Color32::GREEN,
            Level::Debug => Color32::from_rgb(0x00, 0xFF, 0xFF),
            Level::Trace => Color32::from_rgb(0xFF, 0x00, 0xFF),
        }
    }

    /// Time since the logger started, as `seconds.millis`.
    pub fn elapsed(&self) -> String {
        let ms = (self.timestamp - self.start).whole_milliseconds().max(0);
        format!("{:>4}.{:03}", ms / 1000, ms % 1000)
    }

    pub fn display(&self, opts: DisplayOptions, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            if opts.elapsed {
                ui.add(Label::new(
                    RichText::new(self.elapsed())
                        .monospace()
                        .color(Color32::LIGHT_BLUE),
                ));
            }

            if opts.level {
                ui.add(Label::new(
                    RichText::new(self.level_label())
                        .monospace()
                        .color(Self::level_color(self.level)),
                ));
            }

            if opts.target {
                ui.monospace(&*self.target);
            }

            ui.add(
                Label::new(
                    RichText::new(&*self.data)
                        .monospace()
                        .color(ui.style().visuals.strong_text_color()),
                )
                .wrap(true),
            );
        });
    }
}

struct Logger {
    sender: flume::Sender<Record>,
    start: OffsetDateTime,
}

impl Logger {
    fn new(sender: flume::Sender<Record>) -> Self {
        Self {
            sender,
            start: now(),
        }
    }

    fn is_from_our_pkg(metadata: &log::Metadata<'_>) -> bool {
        let target = metadata.target();
        let head = target.split("::").next().unwrap_or(target);
        head == env!("CARGO_PKG_NAME") || head == env!("CARGO_CRATE_NAME")
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        Self::is_from_our_pkg(metadata)
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // the receiver going away just means the window is gone
        let _ = self.sender.send(Record {
            timestamp: now(),
            start: self.start,
            target: Box::from(record.target()),
            level: record.level(),
            data: Box::from(&*record.args().to_string()),
        });
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use log::{Level, Log, Metadata, Record as LogRecord};
    use time::Duration;

    use super::*;

    #[test]
    fn keeps_only_our_records() {
        let (tx, rx) = flume::unbounded();
        let logger = Logger::new(tx);

        for target in ["namewheel::spin", "namewheel", "eframe::native", "winit"] {
            logger.log(
                &LogRecord::builder()
                    .level(Level::Info)
                    .target(target)
                    .args(format_args!("hello from {target}"))
                    .build(),
            );
        }

        let records = rx.try_iter().collect::<Vec<_>>();
        assert_eq!(records.len(), 2);
        assert_eq!(&*records[0].data, "hello from namewheel::spin");
        assert_eq!(&*records[1].target, "namewheel");

        assert!(!logger.enabled(&Metadata::builder().target("egui").build()));
    }

    #[test]
    fn elapsed_format() {
        let start = OffsetDateTime::UNIX_EPOCH;
        let record = Record {
            timestamp: start + Duration::milliseconds(12_345),
            start,
            target: Box::from("namewheel"),
            level: Level::Info,
            data: Box::from("spun"),
        };
        assert_eq!(record.elapsed(), "  12.345");
    }
}
