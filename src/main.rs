fn main() {
    disco_cop::game::run();
}
