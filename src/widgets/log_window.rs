use eframe::egui::{ScrollArea, Window};

use crate::{
    logger::{DisplayOptions, Record},
    Queue,
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Level(log::Level),
}

impl Filter {
    fn allows(&self, level: log::Level) -> bool {
        match self {
            Self::All => true,
            Self::Level(max) => level <= *max,
        }
    }
}

/// The last few hundred log records, kept for the log window.
#[derive(Default)]
pub struct LogWindow {
    records: Queue<Record>,
    filter: Filter,
    opts: DisplayOptions,
}

impl LogWindow {
    pub fn with_capacity(max: usize) -> Self {
        Self {
            records: Queue::with_capacity(max),
            ..Self::default()
        }
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Moves everything the logger has sent so far into the window.
    pub fn drain(&mut self, receiver: &flume::Receiver<Record>) {
        for record in receiver.try_iter() {
            self.push(record);
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = &Record> + '_ {
        self.records
            .iter()
            .filter(|record| self.filter.allows(record.level))
    }

    pub fn display(&mut self, open: &mut bool, ctx: &egui::Context) {
        Window::new("logs")
            .default_height(200.0)
            .resizable(true)
            .collapsible(true)
            .open(open)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    use log::Level::*;
                    ui.selectable_value(&mut self.filter, Filter::All, "all");
                    for level in [Error, Warn, Info, Debug, Trace] {
                        let repr = level.as_str().to_ascii_lowercase();
                        ui.selectable_value(&mut self.filter, Filter::Level(level), repr);
                    }

                    ui.separator();
                    ui.toggle_value(&mut self.opts.elapsed, "time");
                    ui.toggle_value(&mut self.opts.level, "level");
                    ui.toggle_value(&mut self.opts.target, "target");

                    if ui.small_button("clear").clicked() {
                        self.records.clear();
                    }
                });

                ui.separator();
                ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        let opts = self.opts;
                        for record in self.visible() {
                            record.display(opts, ui);
                        }
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use log::Level;
    use time::OffsetDateTime;

    use super::{Filter, LogWindow};
    use crate::logger::Record;

    fn record(level: Level) -> Record {
        Record {
            timestamp: OffsetDateTime::UNIX_EPOCH,
            start: OffsetDateTime::UNIX_EPOCH,
            target: Box::from("namewheel"),
            level,
            data: Box::from(level.as_str()),
        }
    }

    #[test]
    fn filter_by_level() {
        let (tx, rx) = flume::unbounded();
        for level in [Level::Trace, Level::Info, Level::Error, Level::Debug] {
            tx.send(record(level)).unwrap();
        }

        let mut window = LogWindow::with_capacity(10);
        window.drain(&rx);
        assert_eq!(window.visible().count(), 4);

        window.filter = Filter::Level(Level::Info);
        let shown = window
            .visible()
            .map(|r| &*r.data)
            .collect::<Vec<_>>();
        assert_eq!(shown, ["INFO", "ERROR"]);
    }

    #[test]
    fn bounded() {
        let mut window = LogWindow::with_capacity(2);
        for _ in 0..5 {
            window.push(record(Level::Info));
        }
        assert_eq!(window.visible().count(), 2);
    }
}
