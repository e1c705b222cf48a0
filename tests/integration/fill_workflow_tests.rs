/*!
 * Integration tests for the scan and generate workflow
 */

use std::fs;
use anyhow::Result;

use docfill::app_config::{Config, NamingStrategy};
use docfill::app_controller::Controller;
use docfill::document::{ContainerSource, Paragraph, RgbColor};
use docfill::file_utils::FileManager;
use docfill::mapping::Mapping;
use crate::common;

fn form_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("selected_templates", "contract.json"),
        ("ph:{CONTRACT_NO}", "17/24"),
        ("ph:{FULL_NAME}", "Jane Doe"),
        ("ph:{SERVICE}", "Consulting"),
        ("ph:{PRICE}", "1 200"),
        ("ph:{DATE}", "2024-05-01"),
    ]
}

/// Test the full list, scan, generate workflow
#[test]
fn test_fill_workflow_withFormValues_shouldWriteFilledDocuments() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let templates_dir = temp_dir.path().join("templates");
    let output_dir = temp_dir.path().join("generated");
    fs::create_dir(&templates_dir)?;

    common::create_test_template(&templates_dir, "contract.json", &common::sample_contract())?;
    common::create_test_template(
        &templates_dir,
        "annex.json",
        &docfill::Document::new().with_paragraph(Paragraph::from_text("Annex for {FULL_NAME}")),
    )?;

    let controller = Controller::with_config(Config::default())?;

    // 1. List the templates
    let templates = controller.list_templates(&templates_dir)?;
    assert_eq!(templates.len(), 2);

    // 2. Scan the placeholders
    let tokens = controller.scan(&templates)?;
    assert_eq!(
        tokens,
        vec!["{CONTRACT_NO}", "{DATE}", "{FULL_NAME}", "{PRICE}", "{SERVICE}"]
    );

    // 3. Decode the submitted form and generate
    let mapping = controller.decode_form(form_fields());
    let summary = controller.generate(&templates, &mapping, &output_dir, false)?;

    assert_eq!(summary.generated.len(), 2);
    assert_eq!(summary.bundle_stem, "Jane Doe");
    assert!(summary.unresolved().is_empty());

    let contract_path = output_dir.join("Jane Doe contract.json");
    assert!(FileManager::file_exists(&contract_path));
    assert!(FileManager::file_exists(output_dir.join("Jane Doe annex.json")));

    // 4. Verify the filled contract
    let filled = FileManager::read_document(&contract_path, "json")?;
    let texts: Vec<String> = filled.containers().map(|(_, p)| p.logical_text()).collect();
    assert!(texts.contains(&"Contract No. 17/24".to_string()));
    assert!(texts.contains(&"Customer: Jane Doe, hereinafter the Customer.".to_string()));
    assert!(texts.contains(&"Consulting".to_string()));
    assert!(texts.contains(&"Signed by Jane Doe on 2024-05-01".to_string()));
    assert!(texts.iter().all(|t| !t.contains('{')));

    // Split placeholder: value lands in the first run, the suffix keeps its run
    let customer = &filled.body[1];
    assert_eq!(customer.runs.len(), 3);
    assert_eq!(customer.runs[0].text, "Customer: Jane Doe");
    assert_eq!(customer.runs[1].text, "");
    assert_eq!(customer.runs[1].style, common::highlighted_style());
    assert_eq!(customer.runs[2].text, ", hereinafter the Customer.");

    // Default policy forces black on the run receiving the value
    let number_run = &filled.body[0].runs[1];
    assert_eq!(number_run.text, "17/24");
    assert_eq!(number_run.style.color, Some(RgbColor::BLACK));
    assert!(number_run.style.bold);

    Ok(())
}

/// Test that existing outputs are skipped unless overwrite is forced
#[test]
fn test_generate_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let template = common::create_test_template(temp_dir.path(), "letter.json", &common::sample_contract())?;
    let output_dir = temp_dir.path().join("out");

    let controller = Controller::with_config(Config::default())?;
    let mapping: Mapping = [("{FULL_NAME}", "Kim")].into_iter().collect();
    let templates = vec![template];

    let first = controller.generate(&templates, &mapping, &output_dir, false)?;
    assert_eq!(first.generated.len(), 1);
    assert!(first.unresolved().contains("{DATE}"));

    let second = controller.generate(&templates, &mapping, &output_dir, false)?;
    assert!(second.generated.is_empty());
    assert_eq!(second.skipped, vec![output_dir.join("Kim letter.json")]);

    let third = controller.generate(&templates, &mapping, &output_dir, true)?;
    assert_eq!(third.generated.len(), 1);

    Ok(())
}

/// Test timestamp naming with color normalization turned off
#[test]
fn test_generate_withTimestampNamingAndKeptColor_shouldHonorConfig() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let template = common::create_test_template(temp_dir.path(), "contract.json", &common::sample_contract())?;
    let output_dir = temp_dir.path().join("out");

    let mut config = Config::default();
    config.naming.strategy = NamingStrategy::Timestamp;
    config.fill.normalize_color = false;
    let controller = Controller::with_config(config)?;

    let mapping: Mapping = [("{CONTRACT_NO}", "9")].into_iter().collect();
    let summary = controller.generate(&[template], &mapping, &output_dir, false)?;

    let output = &summary.generated[0].output;
    let name = output.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("contract_"));
    assert!(name.ends_with(".json"));
    assert!(summary.bundle_stem.starts_with("documents_"));

    let filled = FileManager::read_document(output, "json")?;
    assert_eq!(filled.body[0].runs[1].style, common::highlighted_style());

    Ok(())
}

/// Test that generation without templates and invalid configs are rejected
#[test]
fn test_controller_withInvalidInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let controller = Controller::with_config(Config::default())?;
    assert!(controller.generate(&[], &Mapping::new(), temp_dir.path(), false).is_err());
    assert!(controller.list_templates(temp_dir.path().join("missing")).is_err());

    let mut config = Config::default();
    config.naming.token = "not a token".to_string();
    assert!(Controller::with_config(config).is_err());

    Ok(())
}

/// Test that templates sharing a file stem never overwrite each other in one run
#[test]
fn test_generate_withSameStemTemplates_shouldSkipSecondEvenWhenForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let first_dir = temp_dir.path().join("a");
    let second_dir = temp_dir.path().join("b");
    fs::create_dir(&first_dir)?;
    fs::create_dir(&second_dir)?;
    let output_dir = temp_dir.path().join("out");

    let first = common::create_test_template(
        &first_dir,
        "letter.json",
        &docfill::Document::new().with_paragraph(Paragraph::from_text("First {FULL_NAME}")),
    )?;
    let second = common::create_test_template(
        &second_dir,
        "letter.json",
        &docfill::Document::new().with_paragraph(Paragraph::from_text("Second {FULL_NAME}")),
    )?;

    let controller = Controller::with_config(Config::default())?;
    let mapping: Mapping = [("{FULL_NAME}", "Kim")].into_iter().collect();

    let summary = controller.generate(&[first.clone(), second], &mapping, &output_dir, true)?;

    let output = output_dir.join("Kim letter.json");
    assert_eq!(summary.generated.len(), 1);
    assert_eq!(summary.generated[0].template, first);
    assert_eq!(summary.skipped, vec![output.clone()]);

    let written = FileManager::read_document(&output, "json")?;
    assert_eq!(written.body[0].logical_text(), "First Kim");

    Ok(())
}

/// Test that only templates present in the directory listing are selected
#[test]
fn test_selectTemplates_withUnknownNames_shouldKeepListedOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let contract = common::create_test_template(temp_dir.path(), "contract.json", &common::sample_contract())?;
    common::create_test_template(temp_dir.path(), "annex.json", &common::sample_contract())?;
    common::create_test_file(temp_dir.path(), "notes.txt", "{NOT_A_TEMPLATE}")?;

    let controller = Controller::with_config(Config::default())?;

    let selected = controller.select_templates(
        temp_dir.path(),
        &["contract.json", "../secret.json", "notes.txt", "contract.json"],
    )?;
    assert_eq!(selected, vec![contract]);

    assert!(controller.select_templates(temp_dir.path(), &["missing.json"]).is_err());
    let none: [&str; 0] = [];
    assert!(controller.select_templates(temp_dir.path(), &none).is_err());

    Ok(())
}
