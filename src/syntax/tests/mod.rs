mod tests_mixins;
