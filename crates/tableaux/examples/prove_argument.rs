//! Build a few tableaux and print their outcomes, statistics and trees.
//!
//! Usage: cargo run --example prove_argument [LOGIC]

use tableaux::{logics, Argument, Sentence, Tableau, TableauConfig, TableauError};

fn main() -> Result<(), TableauError> {
    let name = std::env::args().nth(1).unwrap_or_else(|| "FDE".to_string());
    let Some(logic) = logics::get(&name) else {
        eprintln!("unknown logic {}, expected one of {:?}", name, logics::NAMES);
        std::process::exit(2);
    };
    let meta = logic.meta();

    let a = Sentence::atomic(0, 0)?;
    let b = Sentence::atomic(1, 0)?;
    let mut arguments = vec![
        Argument::new(a.clone(), [a.conjoin(&b)]).with_title("Conjunction Elimination"),
        Argument::new(b.clone(), [a.disjoin(&b)]).with_title("Disjunction Elimination"),
        Argument::new(b.clone(), [a.material_conditional(&b), a.clone()])
            .with_title("Modus Ponens"),
    ];
    if meta.modal {
        arguments.push(Argument::new(a.clone(), [a.necessarily()]).with_title("Necessity Elimination"));
    }

    for argument in arguments {
        let Some(logic) = logics::get(&name) else {
            break;
        };
        let mut tableau = Tableau::new(logic, Some(argument.clone()), TableauConfig::default());
        let outcome = tableau.build()?;
        println!(
            "{} [{}] {}: {}",
            meta.name,
            argument.title().unwrap_or("untitled"),
            argument,
            outcome
        );
        println!("{}", serde_json::to_string_pretty(&tableau.stats())?);
        if let Some(tree) = tableau.tree() {
            println!(
                "tree: {} leaves, depth {}",
                tree.leaf_count(),
                tree.depth()
            );
        }
    }
    Ok(())
}
