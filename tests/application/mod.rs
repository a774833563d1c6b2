mod answer_pipeline_test;
