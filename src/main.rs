fn main() -> std::process::ExitCode {
    mod_switch_lib::run()
}
