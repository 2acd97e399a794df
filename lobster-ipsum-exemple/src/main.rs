use lobster_ipsum_core::markup::{FailurePolicy, Node, replace_html_comments, replace_markers};
use lobster_ipsum_core::model::synthesis_input::SynthesisInput;
use lobster_ipsum_core::model::vocabulary::Vocabulary;
use lobster_ipsum_core::{Generator, IpsumError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log level is read from RUST_LOG (ex. RUST_LOG=debug)
    env_logger::init();

    // Generator over the built-in vocabulary, sentences of 20 to 140 chars
    let mut generator = Generator::new()?;

    // Exact length: a single sentence of 20 chars
    println!("[20] {}", generator.generate(20.0, None)?);

    // Random length between 150 and 300 chars
    println!("[150-300] {}", generator.generate(150.0, Some(300.0))?);

    // Lengths given as text are parsed first
    match generator.generate_str("abc", None) {
        Ok(_) => println!("Should not happen"),
        Err(IpsumError::InvalidArgument(e)) => println!("Invalid argument: {e}"),
        Err(e) => return Err(e.into()),
    }

    // Max below min is rejected
    if let Err(e) = generator.generate(10.0, Some(5.0)) {
        println!("{e}");
    }

    // The lenient variant ignores an unusable max and returns an empty
    // string when min itself is unusable
    println!("Lenient [10, max 5]: {}", generator.generate_or_empty(10.0, Some(5.0)));
    println!("Lenient [1]: {:?}", generator.generate_or_empty(1.0, None));

    // Shorter sentences
    generator.set_synthesis_input(SynthesisInput::new(20, 60)?)?;
    println!("[300, short sentences] {}", generator.generate(300.0, None)?);

    // Custom vocabulary: every length from 2 to 6 is covered
    let vocabulary = Vocabulary::new(["ab", "cd", "efg", "hijk", "lmnop", "qrstuv"])?;
    println!(
        "Custom vocabulary: {} words, lengths {}..={}",
        vocabulary.words().count(),
        vocabulary.shortest(),
        vocabulary.longest()
    );
    let custom = Generator::with_vocabulary(vocabulary)?;
    println!("[custom 60] {}", custom.generate(60.0, None)?);

    // Markers in a document tree
    let document = Node::element(
        "body",
        vec![
            Node::element("h1", vec![Node::comment("lobsteripsum 15")]),
            Node::element("p", vec![Node::comment("lobsteripsum 80-120")]),
            Node::element("p", vec![Node::comment("lobsteripsum 1")]),
        ],
    );
    let replaced = replace_markers(&document, &generator, FailurePolicy::RenderMessage);
    println!("{replaced:#?}");

    // Markers in raw HTML
    let html = "<h1><!-- lobsteripsum 15 --></h1>\n<p><!-- lobsteripsum 50-70 --></p>";
    println!("{}", replace_html_comments(html, &generator, FailurePolicy::KeepMarker));

    log::info!("done");
    Ok(())
}
