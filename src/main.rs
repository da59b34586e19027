//! Electra - Diode Circuit Tutor
//!
//! Generates randomized clipper, clamper and Zener circuits and grades
//! predicted output values.
//!
//! # Usage
//!
//! ```bash
//! electra list
//! electra generate parallel_biasclipper --seed 3 --show-answers
//! electra check nobias_clamper --seed 3 0 -2.5 -10 -17.5 -20
//! RUST_LOG=debug electra generate zener_diode3
//! ```

use clap::{Parser, Subcommand};
use electra_core::{
    circuit::Topology,
    error::Result,
    format::to_engineering,
    generator::{GeneratorConfig, ParameterGenerator},
    grading::AnswerSheet,
    QuizSession,
};

/// Diode circuit tutor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available circuit types
    List,

    /// Generate a circuit and print its parameters
    Generate {
        /// Circuit type, e.g. series_clipper or zener_diode2
        #[arg(value_name = "CIRCUIT_TYPE")]
        topology: String,

        /// Seed for reproducible circuits
        #[arg(short, long)]
        seed: Option<u64>,

        /// Also print the correct answers
        #[arg(long)]
        show_answers: bool,
    },

    /// Regenerate a seeded circuit and grade answers for it
    Check {
        /// Circuit type, e.g. series_clipper or zener_diode2
        #[arg(value_name = "CIRCUIT_TYPE")]
        topology: String,

        /// Seed the circuit was generated with
        #[arg(short, long)]
        seed: u64,

        /// Answers: FB:<vout>/RB:<vout> for clippers, voltages for clampers,
        /// sheet values in order for Zeners
        #[arg(value_name = "ANSWER", allow_negative_numbers = true)]
        answers: Vec<String>,
    },
}

fn generator(seed: Option<u64>) -> ParameterGenerator {
    match seed {
        Some(seed) => ParameterGenerator::seeded(GeneratorConfig::default(), seed),
        None => ParameterGenerator::new(GeneratorConfig::default()),
    }
}

fn print_answer_key(session: &QuizSession) -> Result<()> {
    println!("\nAnswers:");
    for (vin, result) in session.answer_key()? {
        let state = result.state().map(|s| format!("{} ", s)).unwrap_or_default();
        let values = result
            .quantities()
            .iter()
            .map(|q| format!("{}={}", q.symbol, to_engineering(q.value, q.unit)))
            .collect::<Vec<_>>()
            .join(", ");
        println!("  Vin = {:.1}V | {}{}", vin, state, values);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::List => {
            for topology in Topology::ALL {
                println!("{:<22} {}", topology.name(), topology.label());
            }
        }

        Command::Generate {
            topology,
            seed,
            show_answers,
        } => {
            let topology: Topology = topology.parse()?;
            let session = QuizSession::new().new_circuit(&mut generator(seed), topology);
            println!("{}", session.describe()?);
            if show_answers {
                print_answer_key(&session)?;
            }
        }

        Command::Check {
            topology,
            seed,
            answers,
        } => {
            let topology: Topology = topology.parse()?;
            let session = QuizSession::new().new_circuit(&mut generator(Some(seed)), topology);
            println!("{}\n", session.describe()?);

            let sheet = AnswerSheet::parse(topology, &answers)?;
            let session = session.submit(&sheet)?;
            if let Some(report) = session.report() {
                println!("{}", report);
            }
        }
    }

    Ok(())
}
