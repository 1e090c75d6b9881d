mod fake_source;
