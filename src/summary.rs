//! Human-readable text rendering of sizing results.

use std::io::{self, Write};

use uav_core::units::{m_to_mm, ms_to_knots, seconds_to_minutes};
use uav_sizing::SizingReport;
use uav_sizing::matching::ConstraintDiagram;
use uav_sizing::sweep::SweepResult;

pub fn write_summary(out: &mut dyn Write, report: &SizingReport) -> io::Result<()> {
    writeln!(out, "=== Design Case: {} ===", report.case_name)?;
    if let Some(description) = &report.description {
        writeln!(out, "{description}")?;
    }

    let b = &report.budget;
    writeln!(out)?;
    writeln!(out, "=== Weight Budget ===")?;
    writeln!(out, "Payload     : {:.3} kg", b.payload_kg)?;
    writeln!(out, "Avionics    : {:.3} kg", b.avionics_kg)?;
    writeln!(out, "Battery     : {:.3} kg", b.battery_kg)?;
    writeln!(out, "Motor       : {:.3} kg", b.motor_kg)?;
    writeln!(out, "Propeller   : {:.3} kg", b.propeller_kg)?;
    writeln!(
        out,
        "Structure   : {:.3} kg ({:.0}%)",
        b.structure_kg,
        report.design.structural_fraction * 100.0
    )?;
    writeln!(out, "Total       : {:.3} kg", b.total_kg)?;
    writeln!(out, "Converged in {} iterations", report.iterations())?;

    let g = &report.geometry;
    writeln!(out)?;
    writeln!(out, "=== Wing Geometry ===")?;
    writeln!(out, "Area        : {:.4} m^2", g.area_m2)?;
    writeln!(out, "Span        : {:.3} m", g.span_m)?;
    writeln!(out, "Mean chord  : {:.4} m", g.mean_chord_m)?;
    writeln!(
        out,
        "Root / tip  : {:.4} m / {:.4} m (taper {:.2})",
        g.root_chord_m, g.tip_chord_m, g.taper_ratio
    )?;

    let p = &report.performance;
    writeln!(out)?;
    writeln!(out, "=== Cruise Aerodynamics ===")?;
    writeln!(out, "CL (cruise) : {:.4}", p.cruise_lift_coefficient)?;
    writeln!(
        out,
        "CD (cruise) : {:.5} (CD0 {:.5}, induced {:.5})",
        p.cruise_drag.total, p.cruise_drag.parasite, p.cruise_drag.induced
    )?;
    writeln!(out, "L/D (cruise): {:.2}", p.cruise_lift_to_drag)?;
    writeln!(
        out,
        "L/D (max)   : {:.2} at CL = {:.3}",
        p.max_lift_to_drag.lift_to_drag, p.max_lift_to_drag.lift_coefficient
    )?;
    writeln!(out, "Reynolds    : {:.0} (mean chord)", p.reynolds_number)?;

    writeln!(out)?;
    writeln!(out, "=== Mission Energy ===")?;
    for phase in report.energy.phases() {
        writeln!(
            out,
            "{:<7}: {:>6.1} min, {:>5.0} W, {:>6.1} Wh (CL {:.3}, L/D {:.1})",
            phase.phase.label(),
            seconds_to_minutes(phase.duration_s),
            phase.power_w,
            phase.energy_wh,
            phase.lift_coefficient,
            phase.lift_to_drag
        )?;
    }
    let e = &report.energy;
    writeln!(
        out,
        "payload: {:>5.0} W, {:.1} Wh",
        e.payload_power_w, e.payload_energy_wh
    )?;
    writeln!(
        out,
        "Flight time {:.1} min, shaft {:.1} Wh, battery {:.1} Wh ({:.0}% efficiency)",
        seconds_to_minutes(e.total_flight_time_s),
        e.shaft_energy_wh,
        e.battery_energy_wh,
        e.propulsive_efficiency * 100.0
    )?;

    writeln!(out)?;
    writeln!(out, "=== Propulsion ===")?;
    writeln!(out, "Cruise power: {:.1} W", e.cruise.power_w)?;
    writeln!(
        out,
        "Battery     : {:.1} Wh with reserve, {:.0} g",
        report.battery.energy_with_reserve_wh,
        report.battery.mass_kg * 1e3
    )?;
    writeln!(
        out,
        "Motor       : {:.0} W rated, {:.0} g",
        report.motor.rated_power_w,
        report.motor.mass_kg * 1e3
    )?;

    writeln!(out)?;
    writeln!(out, "=== Performance ===")?;
    writeln!(
        out,
        "Stall speed : {:.1} m/s ({:.1} kt)",
        p.stall_speed_m_s,
        ms_to_knots(p.stall_speed_m_s)
    )?;
    writeln!(
        out,
        "Cruise/stall: {:.2}{}",
        p.cruise_to_stall_ratio,
        if p.has_stall_margin() { "" } else { " (low)" }
    )?;
    writeln!(out, "Power loading: {:.2} W/N", p.power_loading_w_n)?;

    let s = &report.spar;
    writeln!(out)?;
    writeln!(out, "=== Wing Spar ===")?;
    writeln!(
        out,
        "Ultimate lift: {:.1} N, max shear {:.2} N, root moment {:.2} N*m",
        report.ultimate_lift_n,
        report.loads.max_shear(),
        s.design_moment_n_m
    )?;
    writeln!(
        out,
        "Required D  : strength {:.2} mm, stiffness {:.2} mm ({} governs)",
        m_to_mm(s.strength_diameter_m),
        m_to_mm(s.stiffness_diameter_m),
        s.governing
    )?;
    writeln!(
        out,
        "Selected    : {:.0} mm OD x {:.2} mm wall, {:.1} g",
        m_to_mm(s.section.outer_diameter_m),
        m_to_mm(s.section.wall_thickness_m),
        s.mass_kg * 1e3
    )?;
    writeln!(
        out,
        "Stress      : {:.1} MPa of {:.1} MPa allowable (margin {:.1}%)",
        s.max_stress_pa / 1e6,
        s.allowable_stress_pa / 1e6,
        s.stress_margin * 100.0
    )?;
    writeln!(
        out,
        "Tip deflection: {:.1} mm ({:.1}% of semi-span), tip slope {:.2} deg",
        m_to_mm(report.deflection.tip_deflection_m()),
        report.deflection.deflection_ratio() * 100.0,
        report.deflection.tip_slope_rad().to_degrees()
    )?;

    let a = &report.airframe;
    writeln!(out)?;
    writeln!(out, "=== Airframe Structure ===")?;
    writeln!(out, "Wing        : {:.0} g", a.wing.total_kg() * 1e3)?;
    writeln!(out, "Fuselage    : {:.0} g", a.fuselage.total_kg() * 1e3)?;
    writeln!(out, "Tail        : {:.0} g", a.tail.total_kg() * 1e3)?;
    writeln!(
        out,
        "Total       : {:.0} g of {:.0} g budget (margin {:+.0} g)",
        a.total_kg * 1e3,
        a.budget_kg * 1e3,
        a.margin_kg * 1e3
    )?;
    Ok(())
}

/// Every `stride`-th sample of the matching chart plus the stall limit.
pub fn write_constraints(
    out: &mut dyn Write,
    diagram: &ConstraintDiagram,
    stride: usize,
) -> io::Result<()> {
    writeln!(out, "=== Matching Chart ===")?;
    writeln!(out, "W/S [N/m^2]  cruise P/W [W/N]  climb P/W [W/N]  cruise L/D")?;
    for point in diagram.points.iter().step_by(stride.max(1)) {
        writeln!(
            out,
            "{:>11.1}  {:>16.3}  {:>15.3}  {:>10.2}",
            point.wing_loading_n_m2,
            point.cruise_power_loading_w_n,
            point.climb_power_loading_w_n,
            point.cruise_lift_to_drag
        )?;
    }
    writeln!(
        out,
        "Stall limit : W/S <= {:.1} N/m^2",
        diagram.stall_wing_loading_limit_n_m2
    )?;
    if let Some(best) = diagram.best_cruise_point() {
        writeln!(
            out,
            "Min cruise P/W: {:.3} W/N at W/S = {:.1} N/m^2",
            best.cruise_power_loading_w_n, best.wing_loading_n_m2
        )?;
    }
    writeln!(
        out,
        "Design point: W/S = {:.1} N/m^2, P/W = {:.3} W/N{}",
        diagram.design_wing_loading_n_m2,
        diagram.design_power_loading_w_n,
        if diagram.design_meets_stall_limit() {
            ""
        } else {
            " (exceeds stall limit)"
        }
    )?;
    Ok(())
}

pub fn write_sweep(out: &mut dyn Write, sweep: &SweepResult) -> io::Result<()> {
    writeln!(
        out,
        "=== Sweep: {} ({}) ===",
        sweep.parameter, sweep.case_name
    )?;
    for point in &sweep.points {
        match (point.total_mass_kg, &point.error) {
            (Some(mass), _) => writeln!(
                out,
                "{:>10.4}  mass = {:.4} kg, area = {:.4} m^2, iterations = {}",
                point.value,
                mass,
                point.wing_area_m2.unwrap_or_default(),
                point.iterations.unwrap_or_default()
            )?,
            (None, error) => writeln!(
                out,
                "{:>10.4}  failed: {}",
                point.value,
                error.as_deref().unwrap_or("unknown error")
            )?,
        }
    }
    Ok(())
}
