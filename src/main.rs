fn main() -> anyhow::Result<()> {
    search_prompt::run()
}
