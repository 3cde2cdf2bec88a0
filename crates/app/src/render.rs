//! Presentation of a summary: relabels members and writes text, JSON or CSV.

use std::io::Write;

use pareggio_api::{
    Currency,
    report::{BalanceLine, SettlementLine, SummaryReport},
};
use pareggio_engine::{MemberLabels, MoneyCents, Summary};

use crate::{config::OutputFormat, error::Result};

/// Which part of the report is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Summary,
    Balances,
    Settlements,
}

pub fn build_report<L: MemberLabels + ?Sized>(
    summary: &Summary,
    labels: &L,
    currency: Currency,
    group: Option<String>,
) -> SummaryReport {
    SummaryReport {
        group,
        currency,
        total_amount: summary.total_amount.to_string(),
        expense_count: summary.expense_count,
        balances: summary
            .balances
            .iter()
            .map(|balance| BalanceLine {
                member_id: balance.member.to_string(),
                member: labels.label_or_id(&balance.member).to_string(),
                net: signed(balance.net),
            })
            .collect(),
        settlements: summary
            .settlements
            .iter()
            .map(|settlement| SettlementLine {
                from_id: settlement.from.to_string(),
                from: labels.label_or_id(&settlement.from).to_string(),
                to_id: settlement.to.to_string(),
                to: labels.label_or_id(&settlement.to).to_string(),
                amount: settlement.amount.to_string(),
            })
            .collect(),
    }
}

pub fn write_report<W: Write>(
    report: &SummaryReport,
    view: View,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(report, view, out)?,
        OutputFormat::Json => {
            match view {
                View::Summary => serde_json::to_writer_pretty(&mut *out, report)?,
                View::Balances => serde_json::to_writer_pretty(&mut *out, &report.balances)?,
                View::Settlements => serde_json::to_writer_pretty(&mut *out, &report.settlements)?,
            }
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            match view {
                View::Balances => {
                    for line in &report.balances {
                        writer.serialize(line)?;
                    }
                }
                View::Summary | View::Settlements => {
                    for line in &report.settlements {
                        writer.serialize(line)?;
                    }
                }
            }
            writer.flush()?;
        }
    }
    Ok(())
}

fn write_text<W: Write>(report: &SummaryReport, view: View, out: &mut W) -> std::io::Result<()> {
    let width = report
        .balances
        .iter()
        .map(|line| line.member.chars().count())
        .max()
        .unwrap_or(0);

    if view == View::Summary {
        if let Some(group) = &report.group {
            writeln!(out, "{group}")?;
        }
        writeln!(
            out,
            "Total: {} {} over {} expense(s)",
            report.total_amount, report.currency, report.expense_count
        )?;
        writeln!(out)?;
    }

    if matches!(view, View::Summary | View::Balances) {
        writeln!(out, "Balances")?;
        for line in &report.balances {
            writeln!(out, "  {:<width$}  {:>12}", line.member, line.net)?;
        }
    }

    if view == View::Summary {
        writeln!(out)?;
    }

    if matches!(view, View::Summary | View::Settlements) {
        writeln!(out, "Settlements")?;
        if report.settlements.is_empty() {
            writeln!(out, "  nothing to settle")?;
        }
        for line in &report.settlements {
            writeln!(
                out,
                "  {} -> {}: {} {}",
                line.from, line.to, line.amount, report.currency
            )?;
        }
    }

    Ok(())
}

fn signed(amount: MoneyCents) -> String {
    if amount.is_positive() {
        format!("+{amount}")
    } else {
        amount.to_string()
    }
}
