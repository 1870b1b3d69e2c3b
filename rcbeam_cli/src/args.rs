//! Beam input arguments shared by the calculate, predict, and report commands.

use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Args;
use rcbeam_core::calculations::BeamParameters;
use tracing::debug;

/// Beam description: a JSON file (or stdin) and/or individual flags.
///
/// Flags override values from the file. Anything still unset takes the
/// input-form default (M25, Fe415, 230x450, 4 m, point load, 2-16φ, 8φ@150).
#[derive(Args, Debug, Clone, Default)]
pub struct BeamArgs {
    /// JSON file with the beam parameters ("-" reads stdin)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Concrete grade fck (20, 25, 30, 35, 40)
    #[arg(long)]
    pub fck: Option<i64>,

    /// Steel grade fy (415, 500)
    #[arg(long)]
    pub fy: Option<i64>,

    /// Width b (mm)
    #[arg(long = "width", short = 'b')]
    pub b: Option<f64>,

    /// Overall depth D (mm)
    #[arg(long = "depth", short = 'D')]
    pub depth: Option<f64>,

    /// Span L (mm)
    #[arg(long = "span", short = 'L')]
    pub span: Option<f64>,

    /// "Point Load" or "Two Point Load"
    #[arg(long)]
    pub load_type: Option<String>,

    /// Main bar diameter (mm)
    #[arg(long)]
    pub main_dia: Option<f64>,

    /// Number of main bars
    #[arg(long)]
    pub main_count: Option<i64>,

    /// Stirrup diameter (mm)
    #[arg(long)]
    pub stirrup_dia: Option<f64>,

    /// Stirrup spacing (mm)
    #[arg(long)]
    pub spacing: Option<f64>,
}

impl BeamArgs {
    /// Assemble the raw parameters. Validation happens in the core.
    pub fn to_parameters(&self) -> Result<BeamParameters> {
        let mut params = match self.input.as_deref() {
            Some(source) => read_parameters(source)?,
            None => BeamParameters::default(),
        };

        if let Some(v) = self.fck {
            params.fck = v;
        }
        if let Some(v) = self.fy {
            params.fy = v;
        }
        if let Some(v) = self.b {
            params.b = v;
        }
        if let Some(v) = self.depth {
            params.overall_depth = v;
        }
        if let Some(v) = self.span {
            params.span = v;
        }
        if let Some(v) = &self.load_type {
            params.load_type = v.clone();
        }
        if let Some(v) = self.main_dia {
            params.main_dia = v;
        }
        if let Some(v) = self.main_count {
            params.main_count = v;
        }
        if let Some(v) = self.stirrup_dia {
            params.stirrup_dia = v;
        }
        if let Some(v) = self.spacing {
            params.spacing = v;
        }

        debug!(?params, "beam parameters assembled");
        Ok(params)
    }
}

fn read_parameters(source: &str) -> Result<BeamParameters> {
    let json = if source == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read beam parameters from stdin")?;
        buf
    } else {
        fs::read_to_string(source).with_context(|| format!("Failed to read input file: {}", source))?
    };

    BeamParameters::from_json(&json).with_context(|| format!("Invalid beam parameters in {}", source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcbeam_core::errors::CalcError;

    #[test]
    fn test_defaults_without_flags() {
        let params = BeamArgs::default().to_parameters().unwrap();
        assert_eq!(params, BeamParameters::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = BeamArgs {
            fck: Some(30),
            depth: Some(600.0),
            load_type: Some("Two Point Load".to_string()),
            main_count: Some(3),
            ..BeamArgs::default()
        };
        let params = args.to_parameters().unwrap();
        assert_eq!(params.fck, 30);
        assert_eq!(params.overall_depth, 600.0);
        assert_eq!(params.load_type, "Two Point Load");
        assert_eq!(params.main_count, 3);
        assert_eq!(params.b, 230.0);
    }

    #[test]
    fn test_file_then_flags() {
        let path = std::env::temp_dir().join(format!("rcbeam_args_{}.json", std::process::id()));
        let file_params = BeamParameters {
            b: 300.0,
            main_count: 4,
            ..BeamParameters::default()
        };
        fs::write(&path, serde_json::to_string(&file_params).unwrap()).unwrap();

        let args = BeamArgs {
            input: Some(path.display().to_string()),
            spacing: Some(100.0),
            ..BeamArgs::default()
        };
        let params = args.to_parameters().unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(params.b, 300.0);
        assert_eq!(params.main_count, 4);
        assert_eq!(params.spacing, 100.0);
    }

    #[test]
    fn test_integral_floats_in_file() {
        let path = std::env::temp_dir().join(format!("rcbeam_args_float_{}.json", std::process::id()));
        fs::write(
            &path,
            r#"{"fck": 25.0, "fy": 415, "b": 300, "D": 450, "L": 4000, "load_type": "Point Load",
                "main_dia": 16, "main_count": 4.0, "stirrup_dia": 8, "spacing": 150}"#,
        )
        .unwrap();

        let args = BeamArgs {
            input: Some(path.display().to_string()),
            ..BeamArgs::default()
        };
        let params = args.to_parameters().unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(params.fck, 25);
        assert_eq!(params.main_count, 4);
    }

    #[test]
    fn test_missing_field_is_core_input_error() {
        let path = std::env::temp_dir().join(format!("rcbeam_args_missing_{}.json", std::process::id()));
        fs::write(
            &path,
            r#"{"fck": 25, "fy": 415, "D": 450, "L": 4000, "load_type": "Point Load",
                "main_dia": 16, "main_count": 4, "stirrup_dia": 8, "spacing": 150}"#,
        )
        .unwrap();

        let args = BeamArgs {
            input: Some(path.display().to_string()),
            ..BeamArgs::default()
        };
        let err = args.to_parameters().unwrap_err();
        fs::remove_file(&path).ok();

        match err.downcast_ref::<CalcError>() {
            Some(CalcError::InvalidInput { field, .. }) => assert_eq!(field, "b"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_has_context() {
        let args = BeamArgs {
            input: Some("/nonexistent/beam.json".to_string()),
            ..BeamArgs::default()
        };
        let err = args.to_parameters().unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }
}
