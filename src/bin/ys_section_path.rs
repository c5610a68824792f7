use structopt::StructOpt;
use yieldsurf::section::LoadingPath;
use yieldsurf::StrError;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "ys_section_path",
    about = "Runs a section through a loading path and writes the results to a JSON file"
)]
struct Options {
    /// JSON file with the section parameters and deformations
    input: String,

    /// JSON file to be written with the results
    output: String,

    /// Prints the state of each step
    #[structopt(short, long)]
    verbose: bool,
}

fn main() -> Result<(), StrError> {
    // parse options
    let options = Options::from_args();

    // load path
    let path = LoadingPath::read_json(&options.input)?;

    // run
    let results = path.run(options.verbose)?;
    results.write_json(&options.output)?;

    // message
    let thin_line = format!("{:─^1$}", "", options.output.len());
    println!("\n\n{}", thin_line);
    println!("{} steps computed; the results file is:", results.steps.len());
    println!("{}", options.output);
    println!("{}\n\n", thin_line);
    Ok(())
}
