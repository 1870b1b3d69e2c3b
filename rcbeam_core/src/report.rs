//! # Calculation Report
//!
//! Renders one capacity check as a Typst document and compiles it to PDF.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Values are injected by a single placeholder pass before compilation
//! - Fonts come from `typst-assets`, so no files are read at runtime
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use rcbeam_core::calculations::{analyze, BeamParameters};
//! use rcbeam_core::report::render_capacity_pdf;
//!
//! let spec = BeamParameters::default().validate().unwrap();
//! let analysis = analyze(&spec).unwrap();
//! let pdf_bytes = render_capacity_pdf(&spec, &analysis, "A. Engineer", "26-014").unwrap();
//! std::fs::write("capacity_report.pdf", pdf_bytes).unwrap();
//! ```

use chrono::Utc;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::calculations::{BeamSpec, CapacityAnalysis, LoadPattern};
use crate::calculations::section::COVER_MM;
use crate::equations::registry::escape_typst;
use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling documents without external files.
struct ReportWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Available fonts
    fonts: Vec<Font>,
    /// Library (standard functions)
    library: LazyHash<Library>,
}

impl ReportWorld {
    fn new(source: String) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        ReportWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }

    /// Bundled text and math fonts from typst-assets
    fn load_fonts() -> Vec<Font> {
        typst_assets::fonts()
            .flat_map(|font_bytes| Font::iter(Bytes::new(font_bytes.to_vec())))
            .collect()
    }
}

impl World for ReportWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// Template
// ============================================================================

const CAPACITY_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 25mm, bottom: 25mm, left: 20mm, right: 20mm),
  header: align(right)[
    #text(size: 9pt, fill: gray)[RC Beam Capacity Check]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[Job: {{JOB_ID}}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(size: 10.5pt)

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[Simply-Supported RC Beam Capacity]
    #v(4pt)
    #text(size: 12pt)[{{BEAM_LABEL}}]
  ]
]

#v(12pt)

#grid(
  columns: (1fr, 1fr),
  gutter: 20pt,
  [
    *Project Information*
    #v(4pt)
    #table(
      columns: (auto, 1fr),
      stroke: none,
      row-gutter: 4pt,
      [Engineer:], [{{ENGINEER}}],
      [Job ID:], [{{JOB_ID}}],
      [Date:], [{{DATE}}],
    )
  ],
  [
    *Code Reference*
    #v(4pt)
    IS 456:2000 Plain and Reinforced Concrete, limit state of collapse in
    flexure (Annex G) and shear (Clause 40).
  ]
)

#v(16pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

== Input Parameters

#table(
  columns: (1fr, auto, auto),
  inset: 7pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Parameter*], [*Value*], [*Unit*]),
  [Concrete grade], [{{CONCRETE}}], [MPa],
  [Steel grade], [{{STEEL}}], [MPa],
  [Width b], [{{B}}], [mm],
  [Overall depth D], [{{D}}], [mm],
  [Span L], [{{L}}], [mm],
  [Loading], [{{LOAD}}], [],
  [Main bars], [{{MAIN_COUNT}} nos. {{MAIN_DIA}} mm], [],
  [Stirrups], [2 legs {{STIRRUP_DIA}} mm at {{SPACING}}], [mm],
)

#v(12pt)

== Section

$ d = D - c - phi_s - phi_m / 2 = {{D}} - {{COVER}} - {{STIRRUP_DIA}} - {{MAIN_DIA}} / 2 = {{D_EFF}} "mm" $

#table(
  columns: (1fr, auto, auto),
  inset: 7pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Property*], [*Value*], [*Unit*]),
  [Tension steel A#sub[st]], [{{AST}}], [mm#super[2]],
  [Stirrup legs A#sub[sv]], [{{ASV}}], [mm#super[2]],
  [Reinforcement p#sub[t]], [{{PT}}], [%],
)

#v(12pt)

== Flexure

$ x_u = (0.87 f_y A_"st") / (0.36 f_"ck" b) = {{XU_BAL}} "mm", quad x_(u,"max") = 0.48 d = {{XU_MAX}} "mm" $

{{XU_NOTE}}

$ M_u = 0.36 f_"ck" b x_u (d - 0.42 x_u) = {{MU}} "kN m", quad M_(u,"lim") = {{MU_LIM}} "kN m" $

$ W_"flex" = ({{LOAD_FACTOR}} M_u) / L_"eff" = {{W_FLEX}} "kN", quad L_"eff" = {{EFF_SPAN}} "mm" $

#v(12pt)

== Shear

#table(
  columns: (1fr, auto, auto),
  inset: 7pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Quantity*], [*Value*], [*Unit*]),
  [Design shear strength τ#sub[c]], [{{TAU_C}}], [N/mm#super[2]],
  [Maximum shear stress τ#sub[c,max]], [{{TAU_C_MAX}}], [N/mm#super[2]],
  [Support shear at W#sub[flex]], [{{V}}], [kN],
  [Nominal shear stress τ#sub[v]], [{{TAU_V}}], [N/mm#super[2]],
  [Concrete V#sub[c]], [{{VC}}], [kN],
  [Stirrups V#sub[s]], [{{VS}}], [kN],
  [Total V#sub[u]], [{{VU}}], [kN],
)

$ W_"shear" = 2 V_u = {{W_SHEAR}} "kN" $

#v(16pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

== Capacity

#table(
  columns: (1fr, auto, auto),
  inset: 7pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Result*], [*Value*], [*Unit*]),
  [Gross capacity W#sub[u]], [{{WU_GROSS}}], [kN],
  [Self-weight], [{{SELF_WEIGHT}}], [kN],
  [Net capacity], [{{WU_NET}}], [kN],
  [Moment of resistance M#sub[u]], [{{MU}}], [kN m],
  [Shear resistance V#sub[u]], [{{VU}}], [kN],
)

#v(16pt)

#let status = "{{STATUS}}"
#align(center)[
  #block(
    width: auto,
    fill: if status == "OK" { rgb("#d4edda") } else { rgb("#f8d7da") },
    inset: 16pt,
    radius: 4pt
  )[
    #text(size: 16pt, weight: "bold")[Governing mode: {{MODE}}]
    #v(4pt)
    #text(size: 12pt)[Net capacity {{WU_NET}} kN]
  ]
]

#v(12pt)

{{WARNINGS}}

#v(24pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

#text(size: 9pt, fill: gray)[
  Generated by rcbeam \
  Calculations should be verified by a qualified structural engineer.
]
"##;

// ============================================================================
// Rendering
// ============================================================================

/// Build the Typst source for one capacity check.
///
/// The source is self-contained: it needs only the bundled fonts.
pub fn render_capacity_typst(spec: &BeamSpec, analysis: &CapacityAnalysis, engineer: &str, job_id: &str) -> String {
    let section = &analysis.section;
    let flexure = &analysis.flexure;
    let shear = &analysis.shear;
    let resolution = &analysis.resolution;
    let result = analysis.result();

    let load_factor = match spec.load_pattern() {
        LoadPattern::SinglePoint => "4",
        LoadPattern::TwoPoint => "6",
    };
    let xu_note = if flexure.xu_clamped {
        "Over-reinforced: x#sub[u] is limited to x#sub[u,max]."
    } else {
        "Under-reinforced: x#sub[u] is below x#sub[u,max]."
    };
    let warnings = if resolution.warnings.is_empty() {
        "No warnings.".to_string()
    } else {
        let items: Vec<String> = resolution
            .warnings
            .iter()
            .map(|w| format!("- {}", escape_typst(w.message())))
            .collect();
        format!("*Warnings:*\n{}", items.join("\n"))
    };

    let values = [
        ("WARNINGS", warnings),
        ("BEAM_LABEL", escape_typst(&spec.describe())),
        ("ENGINEER", escape_typst(engineer)),
        ("JOB_ID", escape_typst(job_id)),
        ("DATE", Utc::now().format("%Y-%m-%d").to_string()),
        ("CONCRETE", spec.concrete().display_name().to_string()),
        ("STEEL", spec.steel().display_name().to_string()),
        ("B", format!("{:.0}", spec.width_mm())),
        ("D", format!("{:.0}", spec.overall_depth_mm())),
        ("L", format!("{:.0}", spec.span_mm())),
        ("LOAD", spec.load_pattern().display_name().to_string()),
        ("MAIN_COUNT", spec.main_count().to_string()),
        ("MAIN_DIA", format!("{}", spec.main_dia_mm())),
        ("STIRRUP_DIA", format!("{}", spec.stirrup_dia_mm())),
        ("SPACING", format!("{:.0}", spec.spacing_mm())),
        ("COVER", format!("{:.0}", COVER_MM)),
        ("D_EFF", format!("{:.1}", section.effective_depth_mm)),
        ("AST", format!("{:.1}", section.ast_mm2)),
        ("ASV", format!("{:.1}", section.asv_mm2)),
        ("PT", format!("{:.3}", flexure.pt_percent)),
        ("XU_BAL", format!("{:.1}", flexure.xu_balanced_mm)),
        ("XU_MAX", format!("{:.1}", flexure.xu_max_mm)),
        ("XU_NOTE", xu_note.to_string()),
        ("MU", format!("{:.2}", result.mu_knm)),
        ("MU_LIM", format!("{:.2}", flexure.mu_lim_nmm / 1.0e6)),
        ("LOAD_FACTOR", load_factor.to_string()),
        ("W_FLEX", format!("{:.2}", flexure.w_flex_n / 1000.0)),
        ("EFF_SPAN", format!("{:.0}", flexure.effective_span_mm)),
        ("TAU_C_MAX", format!("{:.2}", shear.tau_c_max)),
        ("TAU_C", format!("{:.3}", shear.tau_c)),
        ("TAU_V", format!("{:.3}", shear.tau_v)),
        ("V", format!("{:.2}", shear.v_n / 1000.0)),
        ("VC", format!("{:.2}", shear.vc_n / 1000.0)),
        ("VS", format!("{:.2}", shear.vs_n / 1000.0)),
        ("VU", format!("{:.2}", result.vu_kn)),
        ("W_SHEAR", format!("{:.2}", shear.w_shear_n / 1000.0)),
        ("WU_GROSS", format!("{:.2}", result.wu_kn_gross)),
        ("SELF_WEIGHT", format!("{:.2}", resolution.self_weight_kn)),
        ("WU_NET", format!("{:.2}", result.wu_kn_net)),
        ("MODE", result.mode.display_name().to_string()),
        ("STATUS", if result.is_safe() { "OK" } else { "WARN" }.to_string()),
    ];

    fill_template(CAPACITY_TEMPLATE, &values) + &analysis.equations.generate_appendix_typst()
}

/// Replace each `{{KEY}}` in one left-to-right pass.
///
/// Inserted values are never scanned again. Unknown keys are kept as written.
fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() + 1024);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = &after[..end];
        match values.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

/// Render one capacity check to PDF.
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(CalcError::Internal)` - If the document fails to compile
pub fn render_capacity_pdf(
    spec: &BeamSpec,
    analysis: &CapacityAnalysis,
    engineer: &str,
    job_id: &str,
) -> CalcResult<Vec<u8>> {
    let source = render_capacity_typst(spec, analysis, engineer, job_id);
    compile_pdf(source)
}

fn compile_pdf(source: String) -> CalcResult<Vec<u8>> {
    let world = ReportWorld::new(source);

    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::Internal {
            message: format!("Typst compilation failed: {}", error_msgs.join("; ")),
        }
    })?;

    typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::Internal {
            message: format!("PDF rendering failed: {}", error_msgs.join("; ")),
        }
    })
}
