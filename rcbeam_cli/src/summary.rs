//! Human-readable result table for `rcbeam calculate --summary`.

use std::fmt::{self, Write};

use rcbeam_core::calculations::{BeamSpec, CapacityAnalysis};

const RULE: &str = "═══════════════════════════════════════";

pub fn render(spec: &BeamSpec, analysis: &CapacityAnalysis) -> Result<String, fmt::Error> {
    let result = analysis.result();
    let flexure = &analysis.flexure;
    let shear = &analysis.shear;
    let mut out = String::new();

    writeln!(out, "{RULE}")?;
    writeln!(out, "  RC BEAM CAPACITY (IS 456)")?;
    writeln!(out, "{RULE}")?;
    writeln!(out)?;
    writeln!(out, "Input:")?;
    writeln!(out, "  Section:  {} x {} mm, span {} mm", spec.width_mm(), spec.overall_depth_mm(), spec.span_mm())?;
    writeln!(out, "  Material: {} / {}", spec.concrete(), spec.steel())?;
    writeln!(out, "  Steel:    {}-{}φ main, 2L-{}φ @ {} mm", spec.main_count(), spec.main_dia_mm(), spec.stirrup_dia_mm(), spec.spacing_mm())?;
    writeln!(out, "  Loading:  {}", spec.load_pattern())?;
    writeln!(out)?;
    writeln!(out, "Section:")?;
    writeln!(out, "  d  = {:.1} mm", result.d_mm)?;
    writeln!(out, "  pt = {:.3} %", result.pt_percent)?;
    writeln!(out)?;
    writeln!(out, "Flexure:")?;
    writeln!(
        out,
        "  xu = {:.1} mm (limit {:.1}){}",
        flexure.xu_mm,
        flexure.xu_max_mm,
        if flexure.xu_clamped { " [clamped]" } else { "" }
    )?;
    writeln!(out, "  Mu = {:.2} kN·m", result.mu_knm)?;
    writeln!(out, "  W_flex  = {:.2} kN", flexure.w_flex_n / 1000.0)?;
    writeln!(out)?;
    writeln!(out, "Shear:")?;
    writeln!(out, "  τv = {:.3}  τc = {:.3}  τc,max = {:.2} N/mm²", result.tau_v, result.tau_c, result.tau_c_max)?;
    writeln!(out, "  Vu = {:.2} kN", result.vu_kn)?;
    writeln!(out, "  W_shear = {:.2} kN", shear.w_shear_n / 1000.0)?;
    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "  Gross: {:.2} kN   Net: {:.2} kN", result.wu_kn_gross, result.wu_kn_net)?;
    writeln!(out, "  Mode:  {} {}", result.mode, status_icon(result.is_safe()))?;
    writeln!(out, "{RULE}")?;

    for warning in &result.warnings {
        writeln!(out, "  ! {}", warning)?;
    }

    Ok(out)
}

fn status_icon(ok: bool) -> &'static str {
    if ok { "[OK]" } else { "[WARN]" }
}
