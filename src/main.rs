fn main() -> anyhow::Result<()> {
    pollster::block_on(tree_star::run())
}
