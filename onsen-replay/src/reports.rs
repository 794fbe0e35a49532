use anyhow::Result;
use colored::Colorize;
use std::io::Write;

use onsen_engine::{
    Catalog, CommandProjection, DigProjection, Discipline, Localizer, MonthHalf, TurnAnalytics,
};

/// Totals over a replayed session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub snapshots: usize,
    pub accepted: usize,
    pub anomalies: usize,
    pub mismatches: usize,
    pub degraded: usize,
    pub vital_consumed: Option<u32>,
}

impl ReplaySummary {
    #[must_use]
    pub fn from_results(results: &[TurnAnalytics]) -> Self {
        Self {
            snapshots: results.len(),
            accepted: results.iter().filter(|r| r.accepted).count(),
            anomalies: results.iter().filter(|r| r.is_anomaly()).count(),
            mismatches: results
                .iter()
                .flat_map(|r| r.diagnostics.iter())
                .filter(|d| matches!(d, onsen_engine::Diagnostic::TrainLevelMismatch { .. }))
                .count(),
            degraded: results.iter().filter(|r| r.degraded).count(),
            vital_consumed: results.iter().rev().find_map(|r| r.vital_consumed),
        }
    }
}

fn discipline_name(catalog: &Catalog, discipline: Discipline) -> String {
    catalog.tr(&format!("discipline.{}", discipline.label()), &[])
}

fn calendar_label(catalog: &Catalog, result: &TurnAnalytics) -> String {
    let year = result.calendar.year.to_string();
    let month = result.calendar.month.to_string();
    let half_key = match result.calendar.half {
        MonthHalf::Early => "report.early",
        MonthHalf::Late => "report.late",
    };
    format!(
        "{} {}",
        catalog.tr("report.year", &[("year", year.as_str())]),
        catalog.tr(half_key, &[("month", month.as_str())])
    )
}

fn dig_label(catalog: &Catalog, dig: DigProjection) -> String {
    match dig {
        DigProjection::Unavailable => catalog.tr("report.dig-unavailable", &[]),
        DigProjection::NoActiveOnsen => catalog.tr("report.dig-none", &[]),
        DigProjection::Completed => catalog.tr("report.dig-completed", &[]),
        DigProjection::Digging {
            amount,
            remaining_layers,
            total_layers,
            rest_volume,
        } => format!("{amount} ({remaining_layers}/{total_layers}, {rest_volume})"),
    }
}

fn command_row(catalog: &Catalog, command: &CommandProjection) -> String {
    format!(
        "{:<10} {:>3} {:>4}% {:>6} {:>4} {:>6} {:>6}  {}",
        discipline_name(catalog, command.discipline),
        command.level,
        command.failure_rate,
        command.score,
        command.pt_gain,
        command.vital_after,
        command.to_max,
        dig_label(catalog, command.dig)
    )
}

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[TurnAnalytics],
    catalog: &Catalog,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "♨️  Onsen Session Replay".bright_cyan().bold())?;
    writeln!(out, "{}", "========================".cyan())?;

    for result in results {
        let session = if result.full_session {
            catalog.tr("report.full-session", &[])
        } else {
            catalog.tr("report.partial-session", &[])
        };
        writeln!(
            out,
            "{} {} · {} · {:?} [{}]",
            catalog.tr("report.turn", &[]).bold(),
            result.turn.to_string().bold(),
            calendar_label(catalog, result),
            result.stage,
            session
        )?;

        if !result.accepted {
            for message in &result.messages {
                writeln!(out, "   {}", message.dimmed())?;
            }
            continue;
        }

        let vital = result
            .vital_consumed
            .map_or_else(|| "-".to_string(), |v| v.to_string());
        writeln!(
            out,
            "   {} {} | {} {} ({} {}) | {} {}",
            catalog.tr("report.motivation", &[]),
            result.motivation,
            catalog.tr("report.attributes", &[]),
            result.total_attributes,
            catalog.tr("report.with-pt", &[]),
            result.total_with_pt,
            catalog.tr("report.vital-consumed", &[]),
            vital
        )?;

        if let Some(bathing) = result.bathing {
            let tickets = bathing.ticket_num.to_string();
            let remain = bathing.onsen_effect_remain_count.to_string();
            let superior = bathing.superior_state.to_string();
            writeln!(
                out,
                "   {}",
                catalog.tr(
                    "report.bathing",
                    &[
                        ("tickets", tickets.as_str()),
                        ("remain", remain.as_str()),
                        ("superior", superior.as_str()),
                    ],
                )
            )?;
        }

        for command in &result.commands {
            let row = command_row(catalog, command);
            if command.best {
                writeln!(out, "   {}", row.green().bold())?;
            } else if command.enabled {
                writeln!(out, "   {row}")?;
            } else {
                writeln!(out, "   {}", row.dimmed())?;
            }
        }

        for row in &result.event_perf {
            writeln!(out, "   {row}")?;
        }
        for message in &result.messages {
            writeln!(out, "   ⚠️  {}", message.yellow())?;
        }
        if result.degraded {
            writeln!(out, "   {}", catalog.tr("report.degraded", &[]).red())?;
        }
    }

    write_console_summary(out, &ReplaySummary::from_results(results))
}

fn write_console_summary(out: &mut dyn Write, summary: &ReplaySummary) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Summary".bright_yellow().bold())?;
    writeln!(out, "{}", "==========".yellow())?;
    writeln!(out, "Snapshots: {}", summary.snapshots)?;
    writeln!(out, "Accepted turns: {}", summary.accepted.to_string().green())?;
    writeln!(out, "Anomalies: {}", summary.anomalies.to_string().red())?;
    writeln!(out, "Level corrections: {}", summary.mismatches)?;
    writeln!(out, "Degraded snapshots: {}", summary.degraded)?;
    if let Some(vital) = summary.vital_consumed {
        writeln!(out, "Vital consumed: {vital}")?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, results: &[TurnAnalytics]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, results)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(
    out: &mut dyn Write,
    results: &[TurnAnalytics],
    catalog: &Catalog,
) -> Result<()> {
    writeln!(out, "# Onsen Session Replay\n")?;

    let summary = ReplaySummary::from_results(results);
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Snapshots**: {}", summary.snapshots)?;
    writeln!(out, "- **Accepted turns**: {}", summary.accepted)?;
    writeln!(out, "- **Anomalies**: {}", summary.anomalies)?;
    writeln!(out, "- **Level corrections**: {}", summary.mismatches)?;
    if let Some(vital) = summary.vital_consumed {
        writeln!(out, "- **Vital consumed**: {vital}")?;
    }
    writeln!(out)?;

    writeln!(out, "## Turns\n")?;
    for result in results {
        writeln!(
            out,
            "### {} {} ({})\n",
            catalog.tr("report.turn", &[]),
            result.turn,
            calendar_label(catalog, result)
        )?;
        for message in &result.messages {
            writeln!(out, "> {message}")?;
        }
        if !result.messages.is_empty() {
            writeln!(out)?;
        }
        if !result.accepted || result.commands.is_empty() {
            continue;
        }

        writeln!(
            out,
            "| | {} | {} | {} | {} | {} | {} |",
            catalog.tr("report.level", &[]),
            catalog.tr("report.failure", &[]),
            catalog.tr("report.score", &[]),
            catalog.tr("report.pt", &[]),
            catalog.tr("report.vital", &[]),
            catalog.tr("report.dig", &[])
        )?;
        writeln!(out, "|---|---|---|---|---|---|---|")?;
        for command in &result.commands {
            let name = discipline_name(catalog, command.discipline);
            let name = if command.best {
                format!("**{name}**")
            } else {
                name
            };
            writeln!(
                out,
                "| {} | {} | {}% | {} | {} | {} | {} |",
                name,
                command.level,
                command.failure_rate,
                command.score,
                command.pt_gain,
                command.vital_after,
                dig_label(catalog, command.dig)
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}
