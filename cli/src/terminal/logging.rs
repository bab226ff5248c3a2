use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

/// Symbol-prefixed log lines, on stderr so the report table on stdout
/// stays pipeable.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .event_format(SymbolFormatter)
        .init();
}

struct SymbolFormatter;

impl<S, N> FormatEvent<S, N> for SymbolFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let symbol: ColoredString = match *event.metadata().level() {
            Level::TRACE => "[ ]".dimmed(),
            Level::DEBUG => "[?]".blue(),
            Level::INFO => "[+]".green().bold(),
            Level::WARN => "[*]".yellow().bold(),
            Level::ERROR => "[-]".red().bold(),
        };

        write!(writer, "{symbol} ")?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
