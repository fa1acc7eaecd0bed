//! # Corrocheck CLI Application
//!
//! Terminal frontend for the corroded-pipeline assessment engine. Plays
//! the role of the external caller: prompts for the request fields with
//! the canonical example as defaults, runs the assessment, and prints a
//! formatted result block plus the JSON record for API/LLM use.

use std::io::{self, BufRead, Write};

use corro_core::request::AssessmentRequest;
use corro_core::RemainingLife;

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_str(prompt: &str, default: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn main() {
    println!("Corrocheck CLI - Corroded Pipeline Assessment");
    println!("=============================================");
    println!();
    println!("Press Enter to accept the example value in brackets.");
    println!("Use one consistent unit system throughout.");
    println!();

    let example = AssessmentRequest::example();

    let request = AssessmentRequest {
        diameter: prompt_f64("Pipe diameter [506]: ", example.diameter),
        wall_thickness: prompt_f64("Wall thickness [6.35]: ", example.wall_thickness),
        defect_length: prompt_f64("Defect length [200]: ", example.defect_length),
        defect_depth: prompt_f64("Defect depth [2.5]: ", example.defect_depth),
        smys: prompt_f64("SMYS [360]: ", example.smys),
        smts: prompt_f64("SMTS [455]: ", example.smts),
        maop: prompt_f64("MAOP [1.5]: ", example.maop),
        corrosion_rate: prompt_f64("Corrosion rate, 0 if none [0.1]: ", example.corrosion_rate),
        method: Some(prompt_str(
            "Method (modified-flow-stress / safety-factor-fracture) [modified-flow-stress]: ",
            "modified-flow-stress",
        )),
        safety_class: Some(prompt_str(
            "Safety class (low / medium / high) [medium]: ",
            "medium",
        )),
    };

    println!();

    match request.run() {
        Ok(report) => {
            let outcome = &report.outcome;
            println!("═══════════════════════════════════════");
            println!("  ASSESSMENT RESULTS");
            println!("═══════════════════════════════════════");
            println!();
            println!("Method: {}", outcome.method);
            if let Some(class) = outcome.safety_class {
                println!("Safety class: {}", class);
            }
            println!();
            println!("Defect:");
            println!("  d/t             = {:.4}", outcome.relative_depth);
            println!("  Geometry factor = {:.4}", outcome.geometry_factor);
            println!("  Bulging factor  = {:.4}", outcome.bulging_factor);
            println!();
            println!("Capacity:");
            if let Some(flow_stress) = outcome.flow_stress {
                println!("  Flow stress      = {:.3}", flow_stress);
            }
            if let Some(failure_stress) = outcome.failure_stress {
                println!("  Failure stress   = {:.3}", failure_stress);
            }
            println!("  Failure pressure = {:.3}", outcome.failure_pressure);
            println!();
            println!(
                "  ERF = {:.4} {}",
                outcome.erf,
                status_icon(!outcome.repair_required)
            );

            if let Some(life) = &report.life {
                println!();
                println!("Remaining life:");
                println!("  Min critical depth  = {:.3}", life.min_critical_depth);
                println!(
                    "  Corrosion tolerance = {:.3}",
                    life.remaining_corrosion_tolerance
                );
                match life.remaining_life {
                    RemainingLife::Finite(years) => {
                        println!("  Remaining life      = {:.3} time units", years)
                    }
                    RemainingLife::Infinite => {
                        println!("  Remaining life      = infinite (no active corrosion)")
                    }
                }
            }

            println!();
            println!("═══════════════════════════════════════");
            println!(
                "  RESULT: {}",
                if outcome.repair_required {
                    "REPAIR REQUIRED"
                } else {
                    "ACCEPTABLE AS FOUND"
                }
            );
            println!("═══════════════════════════════════════");

            println!();
            println!("JSON Output (for LLM/API use):");
            if let Ok(json) = serde_json::to_string_pretty(&report.rounded()) {
                println!("{}", json);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
