//! Subcommand bodies: open inputs, run the engine, write reports.

use crate::Result;
use crate::aggregate::{self, RunMatrix};
use crate::benchmark::Benchmark;
use crate::config::Config;
use crate::error::ReportError;
use crate::metrics::{ConflictProfile, CpiProfile, ExecTimeProfile, WritebackProfile};
use crate::pipeline::run_profile;
use crate::report::json::write_json;
use crate::report::{ReportWriter, rows};
use anyhow::bail;
use std::fs;
use std::path::Path;

fn read_input(path: &str) -> std::result::Result<String, ReportError> {
    fs::read_to_string(path).map_err(|e| ReportError::io(path, e))
}

fn ensure_dir(dir: &str) -> std::result::Result<(), ReportError> {
    fs::create_dir_all(dir).map_err(|e| ReportError::io(dir, e))
}

fn join(dir: &str, file: &str) -> String {
    Path::new(dir).join(file).display().to_string()
}

pub fn conflicts(input: &str, output: &str, json: Option<&str>) -> Result<()> {
    let text = read_input(input)?;
    let derived = run_profile(&ConflictProfile, input, &text)?;

    let mut out = ReportWriter::create(output)?;
    for d in &derived {
        out.write_line(&rows::conflict_line(d))?;
    }
    out.finish()?;

    if let Some(json) = json {
        write_json(json, &derived)?;
    }
    Ok(())
}

pub fn writebacks(config: &Config, input: &str, out_dir: &str, json: Option<&str>) -> Result<()> {
    let text = read_input(input)?;
    let derived = run_profile(&WritebackProfile::new(config.discounts), input, &text)?;

    ensure_dir(out_dir)?;
    let mut summary = ReportWriter::create(&join(out_dir, "data2.out"))?;
    let mut split = ReportWriter::create(&join(out_dir, "data_wb.out"))?;
    let mut intra_crit = ReportWriter::create(&join(out_dir, "data_wb_all.out"))?;
    let mut intra_kinds = ReportWriter::create(&join(out_dir, "data_wb_tot.out"))?;
    let mut crit = ReportWriter::create(&join(out_dir, "data_wb_crit.out"))?;

    for d in &derived {
        let r = rows::writeback_rows(d);
        summary.write_line(&r.summary)?;
        for line in &r.split {
            split.write_line(line)?;
        }
        intra_crit.write_line(&r.intra_crit)?;
        intra_kinds.write_line(&r.intra_kinds)?;
        crit.write_line(&r.crit)?;
        println!("{}\t{}", d.header.benchmark, r.intra_crit);
    }

    summary.finish()?;
    split.finish()?;
    intra_crit.finish()?;
    intra_kinds.finish()?;
    crit.finish()?;

    if let Some(json) = json {
        write_json(json, &derived)?;
    }
    Ok(())
}

pub fn exec_time(input: &str, output: &str, json: Option<&str>) -> Result<()> {
    let text = read_input(input)?;
    let derived = run_profile(&ExecTimeProfile, input, &text)?;

    let mut out = ReportWriter::create(output)?;
    out.write_line(&rows::exec_time_title())?;
    for d in &derived {
        out.write_line(&rows::exec_time_line(d))?;
        println!("{}", rows::exec_time_delta_line(d));
    }
    out.finish()?;

    if let Some(json) = json {
        write_json(json, &derived)?;
    }
    Ok(())
}

/// One `<benchmark>.out` per known benchmark, empty when no block matched.
pub fn cpi(input: &str, out_dir: &str, json: Option<&str>) -> Result<()> {
    let text = read_input(input)?;
    let derived = run_profile(&CpiProfile, input, &text)?;

    ensure_dir(out_dir)?;
    for benchmark in Benchmark::ALL {
        let mut out = ReportWriter::create(&join(out_dir, &format!("{}.out", benchmark)))?;
        for d in derived.iter().filter(|d| d.header.benchmark == benchmark) {
            out.write_line(&rows::cpi_line(d))?;
        }
        out.finish()?;
    }

    if let Some(json) = json {
        write_json(json, &derived)?;
    }
    Ok(())
}

pub fn average(
    input_path: &str,
    program: &str,
    file_name: &str,
    repeat: usize,
    output_path: &str,
) -> Result<()> {
    if repeat == 0 {
        bail!("repeat count must be at least 1");
    }

    // `repeat` is unchecked user input; no preallocation.
    let mut runs = Vec::new();
    for run in 1..=repeat {
        let path = aggregate::run_path(input_path, program, run, file_name)
            .display()
            .to_string();
        let text = read_input(&path)?;
        let matrix = RunMatrix::parse(&path, &text)?;
        tracing::debug!(path = matrix.path(), shape = ?matrix.shape(), "loaded run");
        runs.push(matrix);
    }

    let averaged = aggregate::average(&runs)?;

    ensure_dir(output_path)?;
    let mut out = ReportWriter::create(&join(output_path, file_name))?;
    println!("Average values of {}", file_name);
    for line in averaged.lines() {
        out.write_line(&line)?;
        println!("{}", line);
    }
    out.finish()?;
    Ok(())
}
