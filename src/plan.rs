//! Patch plan
//!
//! A plan is a TOML file listing class list edits by element id. Which asset
//! and which element a plan targets is decided by whoever writes it, this
//! only turns the entries into [`PatchOp`]s.
//!
//! ```toml
//! [[patch]]
//! element = 1426098328
//! set = ["card", "card--wide"]
//!
//! [[patch]]
//! element = 17
//! add = ["test-class-added"]
//!
//! [[patch]]
//! swap = [17, 18]
//! ```
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use vta::PatchOp;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error("patch #{index}: {reason}")]
    Invalid { index: usize, reason: &'static str },
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PatchPlan {
    #[serde(default, rename = "patch")]
    pub patches: Vec<PatchEntry>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct PatchEntry {
    pub element: Option<i32>,
    pub set: Option<Vec<String>>,
    pub add: Option<Vec<String>>,
    pub remove: Option<Vec<String>>,
    pub swap: Option<[i32; 2]>,
}

impl PatchEntry {
    fn to_op(&self, index: usize) -> Result<PatchOp, PlanError> {
        let invalid = |reason: &'static str| PlanError::Invalid { index, reason };

        match (self.element, &self.set, &self.add, &self.remove, self.swap) {
            (Some(element), Some(classes), None, None, None) => Ok(PatchOp::SetClasses {
                element,
                classes: classes.clone(),
            }),
            (Some(element), None, Some(classes), None, None) => Ok(PatchOp::AddClasses {
                element,
                classes: classes.clone(),
            }),
            (Some(element), None, None, Some(classes), None) => Ok(PatchOp::RemoveClasses {
                element,
                classes: classes.clone(),
            }),
            (None, None, None, None, Some([a, b])) => Ok(PatchOp::SwapClasses { a, b }),
            (Some(_), None, None, None, Some(_)) => {
                Err(invalid("swap takes its ids in the list, not in `element`"))
            }
            (None, None, None, None, None) => Err(invalid("empty entry")),
            (None, _, _, _, None) => Err(invalid("missing `element`")),
            _ => Err(invalid("expected exactly one of `set`, `add`, `remove` or `swap`")),
        }
    }
}

impl PatchPlan {
    pub fn parse(plan: &str) -> Result<PatchPlan, PlanError> {
        Ok(toml::from_str(plan)?)
    }

    pub fn load(path: &Path) -> Result<PatchPlan, PlanError> {
        PatchPlan::parse(&fs::read_to_string(path)?)
    }

    pub fn ops(&self) -> Result<Vec<PatchOp>, PlanError> {
        self.patches
            .iter()
            .enumerate()
            .map(|(index, entry)| entry.to_op(index))
            .collect()
    }
}

#[cfg(test)]
mod test_plan {
    use super::*;
    use std::io::Write;

    #[test]
    fn every_op() {
        let plan = PatchPlan::parse(
            r#"
            [[patch]]
                element = 1426098328
                set = ["card", "card--wide"]

            [[patch]]
                element = 17
                add = ["test-class-added"]

            [[patch]]
                element = 18
                remove = ["hidden"]

            [[patch]]
                swap = [17, 18]
        "#,
        )
        .unwrap();

        assert_eq!(
            plan.ops().unwrap(),
            vec![
                PatchOp::SetClasses {
                    element: 1426098328,
                    classes: vec!["card".into(), "card--wide".into()],
                },
                PatchOp::AddClasses {
                    element: 17,
                    classes: vec!["test-class-added".into()],
                },
                PatchOp::RemoveClasses {
                    element: 18,
                    classes: vec!["hidden".into()],
                },
                PatchOp::SwapClasses { a: 17, b: 18 },
            ]
        );
    }

    #[test]
    fn empty_plan() {
        let plan = PatchPlan::parse("").unwrap();
        assert!(plan.ops().unwrap().is_empty());
    }

    #[test]
    fn set_to_nothing() {
        let plan = PatchPlan::parse("[[patch]]\nelement = 3\nset = []\n").unwrap();

        assert_eq!(
            plan.ops().unwrap(),
            vec![PatchOp::SetClasses {
                element: 3,
                classes: vec![],
            }]
        );
    }

    #[test]
    fn invalid_entries() {
        for (plan, expect) in [
            ("[[patch]]\n", "empty entry"),
            ("[[patch]]\nset = [\"a\"]\n", "missing `element`"),
            (
                "[[patch]]\nelement = 1\nset = [\"a\"]\nadd = [\"b\"]\n",
                "expected exactly one of `set`, `add`, `remove` or `swap`",
            ),
            (
                "[[patch]]\nelement = 1\nswap = [1, 2]\n",
                "swap takes its ids in the list, not in `element`",
            ),
            (
                "[[patch]]\nelement = 1\n",
                "expected exactly one of `set`, `add`, `remove` or `swap`",
            ),
        ] {
            let plan = PatchPlan::parse(plan).unwrap();
            match plan.ops() {
                Err(PlanError::Invalid { index: 0, reason }) => assert_eq!(reason, expect),
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn unknown_key() {
        assert!(matches!(
            PatchPlan::parse("[[patch]]\nelement = 1\nreplace = [\"a\"]\n"),
            Err(PlanError::Toml(_))
        ));
    }

    #[test]
    fn swap_needs_two_ids() {
        assert!(matches!(
            PatchPlan::parse("[[patch]]\nswap = [1]\n"),
            Err(PlanError::Toml(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[patch]]\nelement = 9\nadd = [\"x\"]").unwrap();

        let plan = PatchPlan::load(file.path()).unwrap();
        assert_eq!(plan.ops().unwrap().len(), 1);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            PatchPlan::load(&dir.path().join("nope.toml")),
            Err(PlanError::IO(_))
        ));
    }
}
