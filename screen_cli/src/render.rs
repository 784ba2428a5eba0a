//! Plain-text report of a calculated screen.

use std::fmt::{self, Write};

use screen_core::calculations::assembly::{Assembly, Component};
use screen_core::calculations::HydraulicPoint;
use screen_core::ScreenResult;

/// Designation, mass with its standard/approximate flag, then the numbered trail.
pub fn report(result: &ScreenResult) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Designation: {}", result.designation)?;
    writeln!(out, "Mass: {:.1} kg", result.total_mass_kg)?;
    if !result.is_standard_size {
        writeln!(out, "Size outside the standard range: mass is approximate")?;
    }
    match result.envelope.drive_power_w {
        Some(w) => {
            writeln!(out, "Drive power: {:.2} kW", w / 1000.0)?;
        }
        None => {
            writeln!(out, "Drive power: no catalogued drive")?;
        }
    }
    writeln!(out)?;
    writeln!(out, "Calculation:")?;
    for entry in &result.trace {
        writeln!(out, "  {}", entry)?;
    }
    Ok(out)
}

/// Indented tree of the bill of materials.
pub fn breakdown(assembly: &Assembly) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{} {}: {:.2} kg", assembly.code, assembly.name, assembly.mass_kg())?;
    write_terms(&mut out, assembly, 1)?;
    Ok(out)
}

fn write_terms(out: &mut String, assembly: &Assembly, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    for term in &assembly.terms {
        let count = term.multiplicity.count();
        writeln!(
            out,
            "{}{} {} x{}: {:.2} kg",
            indent,
            term.component.code(),
            term.component.name(),
            count,
            term.weighted_mass_kg()
        )?;
        if let Component::Assembly(sub) = &term.component {
            write_terms(out, sub, depth + 1)?;
        }
    }
    Ok(())
}

/// One row per blinding level.
pub fn hydraulics(points: &[HydraulicPoint]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Blinding  Level rise  Level ahead  Channel v  Gap v")?;
    for p in points {
        writeln!(
            out,
            "{:>7.0}%  {:>8.3} m  {:>9.3} m  {:>5.2} m/s  {:.2} m/s",
            p.blinding * 100.0,
            p.level_difference_m,
            p.start_level_m,
            p.upstream_velocity_ms,
            p.gap_velocity_ms
        )?;
    }
    Ok(out)
}
