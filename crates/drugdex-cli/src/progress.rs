//! Per-page progress output for the wiki fetch.
//!
//! Lines go to stdout as user output. Quiet mode prints one character per
//! page (`.` done, `x` skipped) and a newline at the end.

use std::io::{self, Write};

use drugdex_ingest::{FetchEvent, FetchObserver};
use tracing::debug;

const UNTITLED: &str = "untitled page";

pub struct ProgressPrinter<W: Write> {
    out: W,
    quiet: bool,
}

impl ProgressPrinter<io::Stdout> {
    pub fn stdout(quiet: bool) -> Self {
        Self::new(io::stdout(), quiet)
    }
}

impl<W: Write> ProgressPrinter<W> {
    pub fn new(out: W, quiet: bool) -> Self {
        Self { out, quiet }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_event(&mut self, event: &FetchEvent<'_>) -> io::Result<()> {
        match (self.quiet, *event) {
            (true, FetchEvent::Skipped { .. }) => {
                write!(self.out, "x")?;
                self.out.flush()
            }
            (true, FetchEvent::Done { .. }) => {
                write!(self.out, ".")?;
                self.out.flush()
            }
            (
                false,
                FetchEvent::Skipped {
                    title,
                    url,
                    index,
                    total,
                },
            ) => writeln!(
                self.out,
                "Skipping {} at {url} ({index} / {total})",
                title.unwrap_or(UNTITLED)
            ),
            (
                false,
                FetchEvent::Done {
                    title,
                    routes,
                    index,
                    total,
                },
            ) => writeln!(
                self.out,
                "Done with {title} [{routes} ROA(s)] ({index} / {total})"
            ),
        }
    }
}

impl<W: Write> FetchObserver for ProgressPrinter<W> {
    fn on_event(&mut self, event: &FetchEvent<'_>) {
        if let Err(error) = self.write_event(event) {
            debug!(%error, "progress output failed");
        }
    }

    fn on_finish(&mut self) {
        if self.quiet
            && let Err(error) = writeln!(self.out)
        {
            debug!(%error, "progress output failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(quiet: bool, events: &[FetchEvent<'_>]) -> String {
        let mut printer = ProgressPrinter::new(Vec::new(), quiet);
        for event in events {
            printer.on_event(event);
        }
        printer.on_finish();
        String::from_utf8(printer.into_inner()).expect("utf8")
    }

    const EVENTS: [FetchEvent<'static>; 3] = [
        FetchEvent::Done {
            title: "LSD",
            routes: 2,
            index: 1,
            total: 3,
        },
        FetchEvent::Skipped {
            title: Some("Experience:LSD"),
            url: "https://psychonautwiki.org/wiki/Experience:LSD",
            index: 2,
            total: 3,
        },
        FetchEvent::Skipped {
            title: None,
            url: "https://psychonautwiki.org/wiki/Broken",
            index: 3,
            total: 3,
        },
    ];

    #[test]
    fn verbose_prints_one_line_per_page() {
        let output = render(false, &EVENTS);
        assert_eq!(
            output,
            "Done with LSD [2 ROA(s)] (1 / 3)\n\
             Skipping Experience:LSD at https://psychonautwiki.org/wiki/Experience:LSD (2 / 3)\n\
             Skipping untitled page at https://psychonautwiki.org/wiki/Broken (3 / 3)\n"
        );
    }

    #[test]
    fn quiet_prints_one_character_per_page() {
        assert_eq!(render(true, &EVENTS), ".xx\n");
    }
}
