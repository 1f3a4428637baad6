use std::fs;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, error, info, warn};

use vcore::hash;
use vta::codec;
use vta::VtaDocument;

mod cli;
use crate::cli::Cli;
use crate::cli::Commands;

mod error;
use crate::error::AppError;

mod plan;
use crate::plan::PatchPlan;

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    let result = match &cli.command {
        Commands::Inspect { file } => inspect(file),
        Commands::Verify { file } => verify(file),
        Commands::Patch {
            plan,
            input,
            output,
        } => patch(plan, input, output.as_deref().unwrap_or(input)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn describe(document: &VtaDocument) -> String {
    let mut out = String::new();
    let header = document.header();

    out.push_str(&format!(
        "HEADER: visual={} template={} type_info={}\n",
        header.visual_count(),
        header.template_count(),
        hex::encode(header.type_info()),
    ));

    // Both are in on-disk order
    for (e, (location, offset)) in document.elements().zip(document.element_offsets()) {
        out.push_str(&format!(
            "{:>8} {:<8} id={} parent={} order={} rid={}\n",
            offset,
            location.kind,
            e.id,
            e.parent_id,
            e.order_in_document,
            e.serialized_data.rid(),
        ));
        out.push_str(&format!("\t\tclasses: {:?}\n", e.classes));
        if !e.stylesheet_paths.is_empty() {
            out.push_str(&format!("\t\tstylesheets: {:?}\n", e.stylesheet_paths));
        }
    }
    for t in document.template_elements() {
        out.push_str(&format!("TEMPLATE {}: {:?}\n", t.element.id, t.alias));
    }

    match document.footer().summary() {
        Ok(s) => out.push_str(&format!(
            "FOOTER: {} bytes, objects={} object_ids={} assets={} slots={} container={} hash={:#010x}\n",
            document.footer().len(),
            s.object_entries,
            s.object_ids,
            s.asset_entries,
            s.slots,
            s.content_container_id,
            s.content_hash,
        )),
        Err(e) => out.push_str(&format!("FOOTER: {} bytes, {}\n", document.footer().len(), e)),
    }
    out
}

fn inspect(file: &Path) -> Result<(), AppError> {
    let data = fs::read(file)?;
    let document = codec::decode(&data)?;

    print!("{}", describe(&document));
    println!("CHECKSUM: {}", hash::to_hex(hash::checksum(&data)));

    for e in document.dangling_parents() {
        warn!("element {} points at missing parent {}", e.id, e.parent_id);
    }
    for id in document.duplicate_ids() {
        warn!("element id {} is used more than once", id);
    }
    Ok(())
}

fn verify(file: &Path) -> Result<(), AppError> {
    let data = fs::read(file)?;
    let document = codec::verify_round_trip(&data)?;

    info!(
        "OK: {} - {} bytes, {} visual, {} template",
        file.display(),
        data.len(),
        document.visual_elements().len(),
        document.template_elements().len(),
    );
    Ok(())
}

fn patch(plan: &Path, input: &Path, output: &Path) -> Result<(), AppError> {
    let ops = PatchPlan::load(plan)?.ops()?;
    info!("PLAN: {} - {} edits", plan.display(), ops.len());

    let data = fs::read(input)?;
    let patched = patch_buffer(&data, &ops)?;

    fs::write(output, &patched)?;
    info!(
        "WROTE: {} - {} -> {} bytes, checksum {} -> {}",
        output.display(),
        data.len(),
        patched.len(),
        hash::to_hex(hash::checksum(&data)),
        hash::to_hex(hash::checksum(&patched)),
    );
    Ok(())
}

fn patch_buffer(data: &[u8], ops: &[vta::PatchOp]) -> Result<Vec<u8>, AppError> {
    // Refuse blobs that would not survive an untouched rewrite
    codec::verify_round_trip(data)?;

    for op in ops {
        debug!("queued {:?}", op);
    }
    let encoded = codec::patch_bytes(data, ops)?;

    // Never hand back something we could not read ourselves
    codec::decode(&encoded)?;
    Ok(encoded)
}

#[cfg(test)]
mod test_main {
    use super::*;
    use std::io::Write;

    use vta::testing::sample_document;
    use vta::PatchError;

    const BODY: i32 = 1426098329;

    #[test]
    fn describe_lists_everything() {
        let document = codec::decode(&sample_document()).unwrap();
        let out = describe(&document);

        assert!(out.starts_with("HEADER: visual=2 template=1"));
        assert!(out.contains("id=1426098329 parent=1426098328"));
        assert!(out.contains("\"card__body--dense\""));
        assert!(out.contains("TEMPLATE 1426098330: TemplateAlias(\"ClubBadge\")"));
        assert!(out.contains("container=42"));
    }

    #[test]
    fn patch_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("AboutClubCard.vta");
        let output = dir.path().join("AboutClubCard.patched.vta");
        let plan = dir.path().join("plan.toml");

        fs::write(&input, sample_document()).unwrap();
        let mut file = fs::File::create(&plan).unwrap();
        writeln!(
            file,
            "[[patch]]\nelement = {}\nadd = [\"test-class-added\"]",
            BODY
        )
        .unwrap();

        patch(&plan, &input, &output).unwrap();

        let document = codec::decode(&fs::read(&output).unwrap()).unwrap();
        for e in document.elements() {
            assert_eq!(
                e.classes.iter().any(|c| c == "test-class-added"),
                e.id == BODY
            );
        }
        // Input untouched when an output is given
        assert_eq!(fs::read(&input).unwrap(), sample_document());
    }

    #[test]
    fn failed_patch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.vta");
        let plan = dir.path().join("plan.toml");

        fs::write(&input, sample_document()).unwrap();
        fs::write(&plan, "[[patch]]\nelement = 404\nset = [\"x\"]\n").unwrap();

        assert!(matches!(
            patch(&plan, &input, &input),
            Err(AppError::Patch(PatchError::ElementNotFound(404)))
        ));
        assert_eq!(fs::read(&input).unwrap(), sample_document());
    }

    #[test]
    fn empty_plan_is_identity() {
        let data = sample_document();
        assert_eq!(patch_buffer(&data, &[]).unwrap(), data);
    }

    #[test]
    fn corrupt_input() {
        let data = sample_document();

        assert!(matches!(
            patch_buffer(&data[..data.len() - 1], &[]),
            Err(AppError::Format(vta::FormatError::Truncated { .. }))
        ));
    }

    #[test]
    fn verify_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.vta");
        fs::write(&input, sample_document()).unwrap();

        verify(&input).unwrap();
        inspect(&input).unwrap();
        assert!(matches!(
            verify(&dir.path().join("missing.vta")),
            Err(AppError::IO(_))
        ));
    }
}
