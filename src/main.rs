fn main() -> anyhow::Result<()> {
    drillbook_lib::run()
}
