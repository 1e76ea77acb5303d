//! Request handler: one submitted request in, documents or a user-facing
//! message out. Failures are reported to the user and never end the session.

use crate::affirmations::random_affirmation;
use crate::catalog::Catalog;
use crate::catering_config::CateringConfig;
use crate::catering_errors::{CatalogError, PlanError};
use crate::documents::{RecipeGuideDocument, ShoppingListDocument};
use crate::localization::{t_args_lang, t_lang};
use crate::planner::CateringPlanner;
use crate::recipe_matcher::RecipeMatcher;
use crate::render::{renderer_for, write_documents, WrittenDocuments};
use anyhow::Result;
use rand::Rng;
use anyhow::Context;
use std::io::{BufRead, Write};
use tracing::{error, info, warn};

/// What happened to a request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    /// Documents were generated
    Planned(WrittenDocuments),
    /// The request was blank
    EmptyRequest,
    /// No recipe matched; nothing was generated
    NoMatch,
    /// The catalog file is missing
    CatalogMissing,
    /// The catalog could not be parsed or failed validation
    CatalogInvalid,
    /// Documents could not be written
    RenderFailed,
}

impl RequestOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Planned(_))
    }
}

/// Handle one request end to end
///
/// The catalog is reloaded on every call so edits to the file are picked up
/// between attempts. Messages for the user are written to `out`; only a
/// failure to write to `out` itself is returned as an error.
pub fn handle_request<W: Write, R: Rng + ?Sized>(
    config: &CateringConfig,
    request: &str,
    out: &mut W,
    rng: &mut R,
) -> Result<RequestOutcome> {
    let language = config.language.as_str();

    if request.trim().is_empty() {
        writeln!(out, "{}", t_lang("error-empty-request", language))?;
        return Ok(RequestOutcome::EmptyRequest);
    }

    if config.show_affirmations {
        writeln!(out, "✨ {}", random_affirmation(rng))?;
    }

    let catalog = match Catalog::load(&config.catalog_path) {
        Ok(catalog) => catalog,
        Err(CatalogError::NotFound { path }) => {
            error!(path = %path.display(), "Recipe catalog not found");
            let path = path.display().to_string();
            writeln!(
                out,
                "{}",
                t_args_lang("error-catalog-not-found", &[("path", path.as_str())], language)
            )?;
            return Ok(RequestOutcome::CatalogMissing);
        }
        Err(e) => {
            error!(error = %e, "Recipe catalog rejected");
            let reason = e.to_string();
            writeln!(
                out,
                "{}",
                t_args_lang("error-catalog-invalid", &[("reason", reason.as_str())], language)
            )?;
            return Ok(RequestOutcome::CatalogInvalid);
        }
    };

    let planner = CateringPlanner::new(RecipeMatcher::new(
        config.match_mode,
        config.default_guest_count,
    ));

    let plan = match planner.plan(&catalog, request) {
        Ok(plan) => plan,
        Err(PlanError::EmptyRequest) => {
            writeln!(out, "{}", t_lang("error-empty-request", language))?;
            return Ok(RequestOutcome::EmptyRequest);
        }
        Err(PlanError::NoMatch(_)) => {
            warn!(request = %request, "No recipes matched");
            writeln!(out, "{}", t_lang("warning-no-match", language))?;
            return Ok(RequestOutcome::NoMatch);
        }
    };

    let recipes = plan.recipes.join(", ");
    let guests = plan.guest_count.to_string();
    writeln!(
        out,
        "{}",
        t_args_lang(
            "plan-summary",
            &[("recipes", recipes.as_str()), ("guests", guests.as_str())],
            language
        )
    )?;

    let shopping_list = ShoppingListDocument::from_plan(&plan, config.precision, language);
    let recipe_guides = RecipeGuideDocument::from_plan(&plan, config.precision, language);
    let renderer = renderer_for(config.format, config.render_options());

    let written = match write_documents(
        renderer.as_ref(),
        &shopping_list,
        &recipe_guides,
        config.output_dir.as_deref(),
    ) {
        Ok(written) => written,
        Err(e) => {
            error!(error = %e, "Failed to write documents");
            let reason = e.to_string();
            writeln!(
                out,
                "{}",
                t_args_lang("error-render", &[("reason", reason.as_str())], language)
            )?;
            return Ok(RequestOutcome::RenderFailed);
        }
    };

    for (name_key, path) in [
        ("shopping-list-name", &written.shopping_list),
        ("recipe-guide-name", &written.recipe_guides),
    ] {
        let document = t_lang(name_key, language);
        let path = path.display().to_string();
        writeln!(
            out,
            "{}",
            t_args_lang(
                "document-written",
                &[("document", document.as_str()), ("path", path.as_str())],
                language
            )
        )?;
    }

    info!(guest_count = plan.guest_count, recipes = %recipes, "Request handled");
    Ok(RequestOutcome::Planned(written))
}

/// Read one request per line until EOF, "quit" or "exit"
///
/// The prompt is shown before every line, including after blank input and
/// after failed requests.
pub fn run_interactive<I: BufRead, W: Write, R: Rng + ?Sized>(
    config: &CateringConfig,
    input: I,
    out: &mut W,
    rng: &mut R,
) -> Result<()> {
    let prompt = t_lang("request-prompt", &config.language);
    writeln!(out, "{prompt}")?;
    out.flush()?;

    for line in input.lines() {
        let line = line.context("Failed to read request")?;
        let request = line.trim();
        if request.eq_ignore_ascii_case("quit") || request.eq_ignore_ascii_case("exit") {
            break;
        }
        if !request.is_empty() {
            handle_request(config, request, out, rng)?;
            writeln!(out)?;
        }

        writeln!(out, "{prompt}")?;
        out.flush()?;
    }

    info!("Interactive session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::fs;
    use tempfile::TempDir;

    fn setup(catalog: Option<&str>) -> (CateringConfig, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("recipes.csv");
        if let Some(contents) = catalog {
            fs::write(&catalog_path, contents).unwrap();
        }
        let config = CateringConfig {
            catalog_path,
            output_dir: Some(dir.path().join("out")),
            show_affirmations: false,
            ..Default::default()
        };
        (config, dir)
    }

    fn run(config: &CateringConfig, request: &str) -> (RequestOutcome, String) {
        let mut out = Vec::new();
        let outcome =
            handle_request(config, request, &mut out, &mut StdRng::seed_from_u64(1)).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    const CATALOG: &str = "RecipeName,Ingredient,Unit,Category,Quantity,BaseServings,Method\n\
                           Meatballs,Beef,g,Meat,2000,50,Roll and bake\n";

    #[test]
    fn test_successful_request_writes_documents() {
        let (config, _dir) = setup(Some(CATALOG));
        let (outcome, output) = run(&config, "Meatballs for 100 people");

        assert!(outcome.is_success());
        assert!(output.contains("Planning Meatballs for 100 guests."));
        if let RequestOutcome::Planned(written) = outcome {
            let list = fs::read_to_string(written.shopping_list).unwrap();
            assert!(list.contains("[ ] 4000 g Beef"));
        }
    }

    #[test]
    fn test_missing_catalog_is_reported() {
        let (config, _dir) = setup(None);
        let (outcome, output) = run(&config, "Meatballs");
        assert_eq!(outcome, RequestOutcome::CatalogMissing);
        assert!(output.contains("Master recipe file not found"));
    }

    #[test]
    fn test_invalid_catalog_is_reported() {
        let (config, _dir) = setup(Some(
            "RecipeName,Ingredient,Unit,Category,Quantity,BaseServings,Method\n\
             Meatballs,Beef,g,Meat,2000,0,Roll and bake\n",
        ));
        let (outcome, output) = run(&config, "Meatballs");
        assert_eq!(outcome, RequestOutcome::CatalogInvalid);
        assert!(output.contains("BaseServings"));
    }

    #[test]
    fn test_no_match_generates_nothing() {
        let (config, dir) = setup(Some(CATALOG));
        let (outcome, output) = run(&config, "Tacos for 20");
        assert_eq!(outcome, RequestOutcome::NoMatch);
        assert!(output.contains("No matching recipes found"));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_blank_request() {
        let (config, _dir) = setup(Some(CATALOG));
        let (outcome, _) = run(&config, "  ");
        assert_eq!(outcome, RequestOutcome::EmptyRequest);
    }

    fn run_session(config: &CateringConfig, input: &str) -> String {
        let mut out = Vec::new();
        run_interactive(
            config,
            input.as_bytes(),
            &mut out,
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_prompt_repeats_after_blank_lines() {
        let (config, _dir) = setup(Some(CATALOG));
        let output = run_session(&config, "\n   \nquit\n");
        assert_eq!(output.matches("Type your request").count(), 3);
    }

    #[test]
    fn test_session_continues_after_failed_request() {
        let (config, _dir) = setup(None);
        let output = run_session(&config, "Meatballs\nMeatballs\nexit\nMeatballs\n");
        assert_eq!(output.matches("Master recipe file not found").count(), 2);
    }

    #[test]
    fn test_affirmation_is_printed_first() {
        let (mut config, _dir) = setup(Some(CATALOG));
        config.show_affirmations = true;
        let (_, output) = run(&config, "Meatballs");
        assert!(output.starts_with("✨ "));
    }
}
