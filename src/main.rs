fn main() -> miette::Result<()> {
    abitest::cli::run()?;
    Ok(())
}
